use crate::types::BrowserVersion;
use std::cmp::Ordering;

/// Integer value of the leading digit run of `s`; 0 when there is none.
/// `"13"` → 13, `"2b"` → 2, `"beta"` → 0. Overlong runs saturate.
pub(crate) fn leading_int(s: &str) -> u64 {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    if end == 0 {
        return 0;
    }
    s[..end].parse().unwrap_or(u64::MAX)
}

/// Is `version >= major.minor.build`?
///
/// `None` when the major component is absent, meaning the answer cannot be
/// determined. Absent minor/patch components count as 0.
pub(crate) fn version_at_least(
    version: &BrowserVersion<'_>,
    target: (u64, u64, u64),
) -> Option<bool> {
    let major = leading_int(version.major()?);
    let minor = version.minor().map_or(0, leading_int);
    let patch = version.patch().map_or(0, leading_int);

    let at_least = match (major.cmp(&target.0), minor.cmp(&target.1)) {
        (Ordering::Equal, Ordering::Equal) => patch >= target.2,
        (Ordering::Equal, ord) => ord == Ordering::Greater,
        (ord, _) => ord == Ordering::Greater,
    };
    Some(at_least)
}
