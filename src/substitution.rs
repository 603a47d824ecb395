use crate::parser::Captures;
use std::borrow::Cow;

/// Replace `$1`, `$2`, ... in `template` with capture groups from the regex
/// match, then trim surrounding whitespace (ua-parser behaviour).
///
/// Returns borrowed data when the template contains no `$N` placeholders,
/// avoiding allocation entirely in that case.
pub(crate) fn substitute<'a>(template: &'a str, captures: &Captures<'a>) -> Cow<'a, str> {
    // Fast path: no placeholders → borrow directly from the template.
    if !template.contains('$') {
        return Cow::Borrowed(template.trim());
    }

    let mut result = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' {
            if let Some(&d) = chars.peek() {
                if d.is_ascii_digit() {
                    chars.next();
                    let idx = (d as u8 - b'0') as usize;
                    if let Some(s) = captures.get_str(idx) {
                        result.push_str(s);
                    }
                    continue;
                }
            }
        }
        result.push(c);
    }

    let trimmed = result.trim();
    if trimmed.len() == result.len() {
        Cow::Owned(result)
    } else {
        Cow::Owned(trimmed.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps<'a>(re: &'a regex::Regex, text: &'a str) -> Captures<'a> {
        Captures::Standard(re.captures(text).unwrap())
    }

    #[test]
    fn basic_substitution() {
        let re = regex::Regex::new(r"(UCBrowser)/(\d+)\.(\d+)").unwrap();
        let c = caps(&re, "UCBrowser/12.13");
        assert_eq!(substitute("UC Browser $2.$3", &c), "UC Browser 12.13");
    }

    #[test]
    fn no_placeholders() {
        let re = regex::Regex::new(r"(CriOS)").unwrap();
        let c = caps(&re, "CriOS");
        assert_eq!(substitute("Chrome Mobile iOS", &c), "Chrome Mobile iOS");
    }

    #[test]
    fn missing_group_is_ignored() {
        let re = regex::Regex::new(r"(Chrome)(?:/(\d+))?").unwrap();
        let c = caps(&re, "Chrome");
        assert_eq!(substitute("$1 $2", &c), "Chrome");
    }
}
