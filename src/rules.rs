use super::error::Result;
use super::helpers::{leading_int, version_at_least};
use super::types::{Defect, ParsedIdentity};
use fancy_regex::Regex;
use std::ops::Range;

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

/// WebKit releases that treat `SameSite=None` as `SameSite=Strict`, keyed by
/// OS family and version. `browser_family` narrows the rule to browsers whose
/// family matches the pattern.
struct WebKitRule {
    os_family: &'static str,
    os_major: &'static str,
    os_minor: Option<&'static str>,
    browser_family: Option<&'static str>,
    defect: Defect,
}

const WEBKIT_RULES: &[WebKitRule] = &[
    WebKitRule {
        os_family: "iOS",
        os_major: "12",
        os_minor: None,
        browser_family: None,
        defect: Defect::Ios12WebKit,
    },
    WebKitRule {
        os_family: "Mac OS X",
        os_major: "10",
        os_minor: Some("14"),
        browser_family: Some("Safari"),
        defect: Defect::MacOsSafariWebKit,
    },
];

/// Chromium is detected on the raw string, independent of the parsed family,
/// so that every Chromium-based browser is covered.
const CHROMIUM_MARKER: &str = r"Chrom(e|ium)";
const CHROMIUM_VERSION: &str = r"Chrom[^/]+/(\d+)";
/// Releases that reject cookies carrying an unknown SameSite value.
const BUGGY_CHROMIUM: Range<u64> = 51..67;

/// Browsers that reject unknown SameSite values below a fixed release.
struct MinimumVersionRule {
    family: &'static str,
    minimum: (u64, u64, u64),
    defect: Defect,
}

const MINIMUM_VERSION_RULES: &[MinimumVersionRule] = &[MinimumVersionRule {
    family: "UC Browser",
    minimum: (12, 13, 2),
    defect: Defect::BuggyUcBrowser,
}];

// ---------------------------------------------------------------------------
// Compiled rules
// ---------------------------------------------------------------------------

struct CompiledWebKitRule {
    rule: &'static WebKitRule,
    browser_family: Option<Regex>,
}

/// The defect table with its patterns compiled once at construction.
pub(crate) struct Rules {
    webkit: Vec<CompiledWebKitRule>,
    chromium_marker: Regex,
    chromium_version: Regex,
}

impl Rules {
    pub fn compile() -> Result<Self> {
        let webkit = WEBKIT_RULES
            .iter()
            .map(|rule| {
                Ok(CompiledWebKitRule {
                    rule,
                    browser_family: rule.browser_family.map(Regex::new).transpose()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            webkit,
            chromium_marker: Regex::new(CHROMIUM_MARKER)?,
            chromium_version: Regex::new(CHROMIUM_VERSION)?,
        })
    }

    /// First defect that applies, in table order: WebKit rules, then
    /// Chromium, then minimum-version rules.
    pub fn find_defect(&self, raw: &str, identity: &ParsedIdentity<'_>) -> Option<Defect> {
        self.webkit
            .iter()
            .find(|r| r.matches(identity))
            .map(|r| r.rule.defect)
            .or_else(|| self.is_buggy_chromium(raw).then_some(Defect::BuggyChromium))
            .or_else(|| {
                MINIMUM_VERSION_RULES
                    .iter()
                    .find(|r| r.matches(identity))
                    .map(|r| r.defect)
            })
    }

    fn is_buggy_chromium(&self, raw: &str) -> bool {
        if !self.chromium_marker.is_match(raw).unwrap_or(false) {
            return false;
        }
        self.extract_chromium_version(raw).is_some_and(|v| BUGGY_CHROMIUM.contains(&v))
    }

    /// Leading integer of the first `Chrom…/<digits>` token, if any.
    fn extract_chromium_version(&self, raw: &str) -> Option<u64> {
        let caps = self.chromium_version.captures(raw).ok()??;
        caps.get(1).map(|m| leading_int(m.as_str()))
    }
}

impl CompiledWebKitRule {
    fn matches(&self, identity: &ParsedIdentity<'_>) -> bool {
        let rule = self.rule;
        let os = &identity.os;
        if os.family.as_deref() != Some(rule.os_family)
            || os.version.major() != Some(rule.os_major)
        {
            return false;
        }
        if let Some(minor) = rule.os_minor {
            if os.version.minor() != Some(minor) {
                return false;
            }
        }
        match &self.browser_family {
            None => true,
            Some(re) => identity
                .family()
                .is_some_and(|family| re.is_match(family).unwrap_or(false)),
        }
    }
}

impl MinimumVersionRule {
    /// An undeterminable version counts as below the minimum.
    fn matches(&self, identity: &ParsedIdentity<'_>) -> bool {
        identity.family() == Some(self.family)
            && !version_at_least(&identity.version, self.minimum).unwrap_or(false)
    }
}
