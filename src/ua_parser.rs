use super::db;
use super::error::Result;
use super::parser::CompiledParser;
use super::parser_data::*;
use super::types::*;
use std::borrow::Cow;
use std::path::Path;

/// Compact ua-parser database bundled with the crate. It covers the agents and
/// platforms the SameSite rules care about; load a full uap-core
/// `regexes.yaml` with [`UapParser::from_path`] for broader coverage.
const EMBEDDED_REGEXES: &str = include_str!("../regexes/user_agents.yml");

/// Family name ua-parser uses for "no match".
const UNKNOWN_FAMILY: &str = "Other";

/// Turns a raw `User-Agent` string into a [`ParsedIdentity`].
///
/// Implementations must not fail on malformed input; an unrecognised agent
/// is reported as an identity whose fields are all absent.
pub trait UserAgentParser: Send + Sync {
    fn parse<'a>(&'a self, raw: &'a str) -> ParsedIdentity<'a>;
}

/// [`UserAgentParser`] backed by a ua-parser (uap-core) style regex database.
pub struct UapParser {
    agent_parser: CompiledParser<EntryData>,
    os_parser: CompiledParser<EntryData>,
}

impl UapParser {
    /// Build the parser from the database compiled into the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_yaml_str(EMBEDDED_REGEXES)
    }

    /// Load a uap-core `regexes.yaml` file from `path` and build the parser.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading user agent database");
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: db::RegexesFile = serde_yaml::from_str(yaml)?;
        let db::RegexesFile {
            user_agent_parsers,
            os_parsers,
        } = file;

        // Build both tables concurrently.
        let (agent_parser, os_parser) = rayon::join(
            || {
                CompiledParser::build(user_agent_parsers.into_iter().map(|e| {
                    (
                        db::flagged_pattern(e.regex, e.regex_flag.as_deref()),
                        EntryData {
                            family: e.family_replacement,
                            major: e.v1_replacement,
                            minor: e.v2_replacement,
                            patch: e.v3_replacement,
                        },
                    )
                }))
            },
            || {
                CompiledParser::build(os_parsers.into_iter().map(|e| {
                    (
                        db::flagged_pattern(e.regex, e.regex_flag.as_deref()),
                        EntryData {
                            family: e.os_replacement,
                            major: e.os_v1_replacement,
                            minor: e.os_v2_replacement,
                            patch: e.os_v3_replacement,
                        },
                    )
                }))
            },
        );

        Ok(Self {
            agent_parser: agent_parser?,
            os_parser: os_parser?,
        })
    }
}

impl UserAgentParser for UapParser {
    fn parse<'a>(&'a self, raw: &'a str) -> ParsedIdentity<'a> {
        let mut identity = ParsedIdentity::default();

        if let Some(m) = self.agent_parser.match_first(raw) {
            let fields = m.data.resolve(&m.captures);
            if let Some(family) = known(fields.family) {
                identity.family = Some(family);
                identity.version = BrowserVersion {
                    major: fields.major,
                    minor: fields.minor,
                    patch: fields.patch,
                };
            }
        }

        if let Some(m) = self.os_parser.match_first(raw) {
            let fields = m.data.resolve(&m.captures);
            if let Some(family) = known(fields.family) {
                identity.os = Os {
                    family: Some(family),
                    version: OsVersion {
                        major: fields.major,
                        minor: fields.minor,
                        patch: fields.patch,
                    },
                };
            }
        }

        identity
    }
}

fn known(family: Option<Cow<'_, str>>) -> Option<Cow<'_, str>> {
    family.filter(|f| f != UNKNOWN_FAMILY)
}
