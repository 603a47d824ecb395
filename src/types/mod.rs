mod defect;
mod identity;

pub use defect::*;
pub use identity::*;
