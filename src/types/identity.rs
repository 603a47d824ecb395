use std::borrow::Cow;

/// Structured browser and OS identity derived from a `User-Agent` string.
///
/// Every field is independently optional; an identity with all fields absent
/// means the agent was not recognised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedIdentity<'a> {
    pub family: Option<Cow<'a, str>>,
    pub version: BrowserVersion<'a>,
    pub os: Os<'a>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserVersion<'a> {
    pub major: Option<Cow<'a, str>>,
    pub minor: Option<Cow<'a, str>>,
    pub patch: Option<Cow<'a, str>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Os<'a> {
    pub family: Option<Cow<'a, str>>,
    pub version: OsVersion<'a>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsVersion<'a> {
    pub major: Option<Cow<'a, str>>,
    pub minor: Option<Cow<'a, str>>,
    pub patch: Option<Cow<'a, str>>,
}

impl<'a> ParsedIdentity<'a> {
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }
    pub fn os_family(&self) -> Option<&str> {
        self.os.family.as_deref()
    }

    /// True when the parser could determine nothing at all.
    pub fn is_unrecognized(&self) -> bool {
        *self == ParsedIdentity::default()
    }
}

impl BrowserVersion<'_> {
    pub fn major(&self) -> Option<&str> {
        self.major.as_deref()
    }
    pub fn minor(&self) -> Option<&str> {
        self.minor.as_deref()
    }
    pub fn patch(&self) -> Option<&str> {
        self.patch.as_deref()
    }
}

impl OsVersion<'_> {
    pub fn major(&self) -> Option<&str> {
        self.major.as_deref()
    }
    pub fn minor(&self) -> Option<&str> {
        self.minor.as_deref()
    }
}
