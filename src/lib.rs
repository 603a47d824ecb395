mod checker;
mod db;
mod error;
mod helpers;
mod parser;
mod parser_data;
mod rules;
mod substitution;
mod types;
mod ua_parser;

pub use checker::SameSiteChecker;
pub use error::{Error, Result};
pub use types::*;
pub use ua_parser::{UapParser, UserAgentParser};
