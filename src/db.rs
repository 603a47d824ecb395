use serde::Deserialize;

/// Top-level layout of a ua-parser (uap-core) `regexes.yaml` file.
///
/// Only the agent and OS tables are read; other sections such as
/// `device_parsers` are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct RegexesFile {
    #[serde(default)]
    pub user_agent_parsers: Vec<UserAgentEntry>,
    #[serde(default)]
    pub os_parsers: Vec<OsEntry>,
}

// ---------------------------------------------------------------------------
// Browsers  (user_agent_parsers)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct UserAgentEntry {
    pub regex: String,
    #[serde(default)]
    pub regex_flag: Option<String>,
    #[serde(default)]
    pub family_replacement: Option<String>,
    #[serde(default)]
    pub v1_replacement: Option<String>,
    #[serde(default)]
    pub v2_replacement: Option<String>,
    #[serde(default)]
    pub v3_replacement: Option<String>,
}

// ---------------------------------------------------------------------------
// Operating Systems  (os_parsers)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct OsEntry {
    pub regex: String,
    #[serde(default)]
    pub regex_flag: Option<String>,
    #[serde(default)]
    pub os_replacement: Option<String>,
    #[serde(default)]
    pub os_v1_replacement: Option<String>,
    #[serde(default)]
    pub os_v2_replacement: Option<String>,
    #[serde(default)]
    pub os_v3_replacement: Option<String>,
}

/// Apply a uap `regex_flag` to a pattern. Only `i` is defined by the format.
pub(crate) fn flagged_pattern(regex: String, flag: Option<&str>) -> String {
    match flag {
        Some(f) if f.contains('i') => format!("(?i){}", regex),
        _ => regex,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_device_parsers_section() {
        let yaml = r#"
user_agent_parsers:
  - regex: '(Firefox)/(\d+)'
os_parsers:
  - regex: '(Linux)'
device_parsers:
  - regex: 'iPhone'
    device_replacement: 'iPhone'
"#;
        let file: RegexesFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.user_agent_parsers.len(), 1);
        assert_eq!(file.os_parsers.len(), 1);
        assert!(file.user_agent_parsers[0].family_replacement.is_none());
    }

    #[test]
    fn case_insensitive_flag() {
        assert_eq!(flagged_pattern("abc".into(), Some("i")), "(?i)abc");
        assert_eq!(flagged_pattern("abc".into(), None), "abc");
    }
}
