use super::error::Result;
use super::rules::Rules;
use super::types::*;
use super::ua_parser::{UapParser, UserAgentParser};
use std::sync::Arc;

/// Decides whether a client can be sent a `SameSite=None` cookie.
///
/// The checker is stateless between calls: build it once with a shared
/// parser and call it from any number of threads.
///
/// ```no_run
/// use samesite_checker::SameSiteChecker;
///
/// let checker = SameSiteChecker::embedded()?;
/// let ua = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
///           (KHTML, like Gecko) Chrome/60.0.3112.113 Safari/537.36";
/// assert!(!checker.send_same_site_none(Some(ua)));
/// # Ok::<(), samesite_checker::Error>(())
/// ```
pub struct SameSiteChecker<P = UapParser> {
    parser: Arc<P>,
    rules: Rules,
}

impl SameSiteChecker<UapParser> {
    /// Checker over the database bundled with the crate.
    pub fn embedded() -> Result<Self> {
        Self::new(Arc::new(UapParser::embedded()?))
    }
}

impl<P: UserAgentParser> SameSiteChecker<P> {
    /// Build a checker around a shared parser. Fails only if the built-in
    /// rule patterns do not compile.
    pub fn new(parser: Arc<P>) -> Result<Self> {
        Ok(Self {
            parser,
            rules: Rules::compile()?,
        })
    }

    pub fn parser(&self) -> &Arc<P> {
        &self.parser
    }

    /// Parse `raw` into an identity. A missing header yields no identity; an
    /// empty one is still handed to the parser.
    pub fn resolve<'a>(&'a self, raw: Option<&'a str>) -> Option<ParsedIdentity<'a>> {
        raw.map(|ua| self.parser.parse(ua))
    }

    /// `true` when `SameSite=None` can be sent.
    ///
    /// Missing identities and empty agents are assumed compatible.
    pub fn is_safe(&self, raw: Option<&str>, identity: Option<&ParsedIdentity<'_>>) -> bool {
        let (raw, identity) = match (raw, identity) {
            (_, None) | (Some(""), _) => return true,
            (raw, Some(identity)) => (raw.unwrap_or_default(), identity),
        };
        self.defect(raw, identity).is_none()
    }

    /// The first known defect affecting this agent, if any.
    pub fn defect(&self, raw: &str, identity: &ParsedIdentity<'_>) -> Option<Defect> {
        let defect = self.rules.find_defect(raw, identity);
        if let Some(defect) = defect {
            tracing::debug!(
                %defect,
                drops_cookie = defect.drops_cookie(),
                family = identity.family(),
                os = identity.os_family(),
                "user agent cannot handle SameSite=None"
            );
        }
        defect
    }

    /// Resolve and classify in one call.
    pub fn send_same_site_none(&self, raw: Option<&str>) -> bool {
        let identity = self.resolve(raw);
        self.is_safe(raw, identity.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Parser stub returning a fixed identity and counting calls.
    struct FixedParser {
        identity: ParsedIdentity<'static>,
        calls: AtomicUsize,
    }

    impl FixedParser {
        fn new(identity: ParsedIdentity<'static>) -> Arc<Self> {
            Arc::new(Self {
                identity,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl UserAgentParser for FixedParser {
        fn parse<'a>(&'a self, _raw: &'a str) -> ParsedIdentity<'a> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.identity.clone()
        }
    }

    fn ios12() -> ParsedIdentity<'static> {
        ParsedIdentity {
            family: Some(Cow::Borrowed("Mobile Safari")),
            os: Os {
                family: Some(Cow::Borrowed("iOS")),
                version: OsVersion {
                    major: Some(Cow::Borrowed("12")),
                    minor: Some(Cow::Borrowed("1")),
                    patch: None,
                },
            },
            ..Default::default()
        }
    }

    #[test]
    fn missing_header_is_not_parsed() {
        let parser = FixedParser::new(ios12());
        let checker = SameSiteChecker::new(parser.clone()).unwrap();
        assert!(checker.resolve(None).is_none());
        assert!(checker.send_same_site_none(None));
        assert_eq!(parser.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_header_is_safe_even_if_parser_says_otherwise() {
        let parser = FixedParser::new(ios12());
        let checker = SameSiteChecker::new(parser.clone()).unwrap();
        assert!(checker.resolve(Some("")).is_some());
        assert!(checker.send_same_site_none(Some("")));
        assert_eq!(parser.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn identity_drives_verdict() {
        let checker = SameSiteChecker::new(FixedParser::new(ios12())).unwrap();
        assert!(!checker.send_same_site_none(Some("anything")));
        let identity = checker.resolve(Some("anything")).unwrap();
        assert_eq!(checker.defect("anything", &identity), Some(Defect::Ios12WebKit));
    }

    #[test]
    fn unrecognized_agent_is_safe() {
        let checker = SameSiteChecker::new(FixedParser::new(ParsedIdentity::default())).unwrap();
        assert!(checker.send_same_site_none(Some("garbage")));
    }

    #[test]
    fn is_safe_without_identity() {
        let checker = SameSiteChecker::new(FixedParser::new(ios12())).unwrap();
        assert!(checker.is_safe(Some("Chrome/60.0"), None));
        assert!(checker.is_safe(None, None));
        // Identity without raw string still runs the identity rules.
        assert!(!checker.is_safe(None, Some(&ios12())));
    }

    #[test]
    fn repeated_calls_agree() {
        let checker = SameSiteChecker::new(FixedParser::new(ParsedIdentity::default())).unwrap();
        let ua = "Mozilla/5.0 (X11; Linux x86_64) Chrome/66.0.3359.181";
        let first = checker.send_same_site_none(Some(ua));
        let second = checker.send_same_site_none(Some(ua));
        assert!(!first);
        assert_eq!(first, second);
    }

    #[test]
    fn checker_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SameSiteChecker>();
    }
}
