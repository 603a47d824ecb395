use crate::parser::Captures;
use crate::substitution::substitute;
use std::borrow::Cow;

// ---------------------------------------------------------------------------
// Internal data carried inside CompiledParser<T>
// ---------------------------------------------------------------------------

/// Replacement templates for one agent or OS entry.
///
/// A `None` template means the field comes from its positional capture group
/// (family → 1, major → 2, minor → 3, patch → 4).
pub(crate) struct EntryData {
    pub family: Option<String>,
    pub major: Option<String>,
    pub minor: Option<String>,
    pub patch: Option<String>,
}

/// Fields pulled out of one successful match.
pub(crate) struct ResolvedFields<'a> {
    pub family: Option<Cow<'a, str>>,
    pub major: Option<Cow<'a, str>>,
    pub minor: Option<Cow<'a, str>>,
    pub patch: Option<Cow<'a, str>>,
}

impl EntryData {
    pub fn resolve<'a>(&'a self, captures: &Captures<'a>) -> ResolvedFields<'a> {
        ResolvedFields {
            family: field(self.family.as_deref(), captures, 1),
            major: field(self.major.as_deref(), captures, 2),
            minor: field(self.minor.as_deref(), captures, 3),
            patch: field(self.patch.as_deref(), captures, 4),
        }
    }
}

fn field<'a>(
    template: Option<&'a str>,
    captures: &Captures<'a>,
    group: usize,
) -> Option<Cow<'a, str>> {
    let value = match template {
        Some(tpl) => substitute(tpl, captures),
        None => Cow::Borrowed(captures.get_str(group)?.trim()),
    };
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
