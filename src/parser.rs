use rayon::prelude::*;

use crate::error::Result;

/// Upper bound for the compiled `RegexSet`; the full uap-core agent table
/// needs more than the `regex` crate default.
const SET_SIZE_LIMIT: usize = 256 * (1 << 20);

// ---------------------------------------------------------------------------
// Captures — unified enum over regex::Captures and fancy_regex::Captures
// ---------------------------------------------------------------------------

/// Lightweight wrapper so callers (substitute, field resolution) don't need
/// to know which regex engine produced the match.
pub(crate) enum Captures<'a> {
    Standard(regex::Captures<'a>),
    Fancy(fancy_regex::Captures<'a>),
}

impl<'a> Captures<'a> {
    /// Get the matched text for capture group `i`, or `None` if the group
    /// didn't participate in the match.
    pub fn get_str(&self, i: usize) -> Option<&'a str> {
        match self {
            Captures::Standard(c) => c.get(i).map(|m| m.as_str()),
            Captures::Fancy(c) => c.get(i).map(|m| m.as_str()),
        }
    }
}

/// Result of a successful match.
pub(crate) struct MatchResult<'a, T> {
    pub data: &'a T,
    pub captures: Captures<'a>,
}

// ---------------------------------------------------------------------------
// CompiledParser — ordered first-match-wins list (agents, OS)
// ---------------------------------------------------------------------------

/// Core matching engine: one `RegexSet` pass over every pattern the `regex`
/// crate supports, plus a fancy-regex fallback for the rest.
///
/// `T` is the associated data for each entry (replacement templates).
pub(crate) struct CompiledParser<T> {
    /// Set built from patterns the `regex` crate can handle.
    set: regex::RegexSet,
    /// Individually compiled copies of the set members, for captures.
    standard: Vec<regex::Regex>,
    /// Maps set index → entry index.
    set_to_entry: Vec<usize>,
    /// Entries whose patterns require PCRE features (lookahead/lookbehind,
    /// backreferences), sorted by entry index.
    fancy_entries: Vec<(usize, fancy_regex::Regex)>,
    /// Entry data indexed by entry index.
    data: Vec<T>,
}

impl<T> CompiledParser<T> {
    /// Build a CompiledParser from an iterator of (regex_pattern, data) pairs.
    ///
    /// Entry order is significant: `match_first` returns the lowest-index
    /// entry that matches.
    pub fn build(items: impl IntoIterator<Item = (String, T)>) -> Result<Self>
    where
        T: Send,
    {
        let (patterns, data): (Vec<String>, Vec<T>) = items.into_iter().unzip();
        let n = patterns.len();

        // Phase 1: classify and compile with the `regex` crate where possible.
        let standard_or_none: Vec<Option<regex::Regex>> = patterns
            .par_iter()
            .map(|p| regex::Regex::new(p).ok())
            .collect();

        let mut standard: Vec<regex::Regex> = Vec::new();
        let mut set_to_entry: Vec<usize> = Vec::new();
        let mut fancy_indices: Vec<usize> = Vec::new();
        for (idx, compiled) in standard_or_none.into_iter().enumerate() {
            match compiled {
                Some(re) => {
                    standard.push(re);
                    set_to_entry.push(idx);
                }
                None => fancy_indices.push(idx),
            }
        }

        // Phase 2: build the set from the patterns that compiled.
        let set = regex::RegexSetBuilder::new(standard.iter().map(|re| re.as_str()))
            .size_limit(SET_SIZE_LIMIT)
            .dfa_size_limit(SET_SIZE_LIMIT)
            .build()?;

        // Phase 3: compile fancy-only patterns in parallel.
        let fancy_regexes: Vec<fancy_regex::Regex> = fancy_indices
            .par_iter()
            .map(|&idx| fancy_regex::Regex::new(&patterns[idx]).map_err(crate::error::Error::from))
            .collect::<Result<Vec<_>>>()?;

        let fancy_entries: Vec<(usize, fancy_regex::Regex)> =
            fancy_indices.into_iter().zip(fancy_regexes).collect();

        tracing::debug!(
            entries = n,
            standard = standard.len(),
            fancy = fancy_entries.len(),
            "compiled user agent rule table"
        );

        Ok(Self {
            set,
            standard,
            set_to_entry,
            fancy_entries,
            data,
        })
    }

    /// Find the first matching entry (preserving database order).
    pub fn match_first<'a>(&'a self, ua: &'a str) -> Option<MatchResult<'a, T>> {
        // `SetMatches` iterates in ascending set order and set_to_entry is
        // monotonically increasing, so the first hit is the lowest entry index
        // among standard patterns.
        let best_standard = self.set.matches(ua).into_iter().next();
        let cutoff = best_standard
            .map(|set_idx| self.set_to_entry[set_idx])
            .unwrap_or(usize::MAX);

        // Fancy entries ordered before the best standard match take priority.
        for &(entry_idx, ref re) in &self.fancy_entries {
            if entry_idx >= cutoff {
                break;
            }
            // Backtrack-limit errors count as "no match".
            if let Ok(Some(caps)) = re.captures(ua) {
                return Some(MatchResult {
                    data: &self.data[entry_idx],
                    captures: Captures::Fancy(caps),
                });
            }
        }

        let set_idx = best_standard?;
        let caps = self.standard[set_idx].captures(ua)?;
        Some(MatchResult {
            data: &self.data[self.set_to_entry[set_idx]],
            captures: Captures::Standard(caps),
        })
    }
}
