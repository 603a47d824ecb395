use std::fmt;

/// A known client defect that makes `SameSite=None` unsafe to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Defect {
    /// iOS 12 WebKit treats `SameSite=None` as `SameSite=Strict`.
    Ios12WebKit,
    /// Safari on macOS 10.14 shares the iOS 12 WebKit bug.
    MacOsSafariWebKit,
    /// Chromium 51 through 66 reject cookies with an unknown SameSite value.
    BuggyChromium,
    /// UC Browser before 12.13.2 rejects cookies with an unknown SameSite value.
    BuggyUcBrowser,
}

impl Defect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ios12WebKit => "ios 12 webkit",
            Self::MacOsSafariWebKit => "macos 10.14 safari webkit",
            Self::BuggyChromium => "chromium 51-66",
            Self::BuggyUcBrowser => "uc browser < 12.13.2",
        }
    }

    /// WebKit defects treat the attribute as `Strict`; the others drop the cookie.
    pub fn drops_cookie(&self) -> bool {
        matches!(self, Self::BuggyChromium | Self::BuggyUcBrowser)
    }
}

impl fmt::Display for Defect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
