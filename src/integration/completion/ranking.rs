//! Ordering of completion results
//!
//! Ranking is a stable two-way partition: entries whose qualified name
//! (`prefix + name`) is a literal prefix of the typed word move to the front.
//! Within each partition catalog order is preserved.

use super::catalog::SymbolEntry;

/// Options controlling how matched entries are returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOptions {
    /// Move entries already spelled out by the typed word to the front
    pub rank_exact_first: bool,

    /// Maximum results to return (`None` = all)
    pub max_results: Option<usize>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            rank_exact_first: true,
            max_results: None,
        }
    }
}

impl MatchOptions {
    /// Catalog order only
    pub fn unranked() -> Self {
        Self {
            rank_exact_first: false,
            max_results: None,
        }
    }
}

/// Whether `word` already spells out the entry's qualified name
pub fn is_spelled_out(entry: &SymbolEntry, word: &str) -> bool {
    word.strip_prefix(entry.prefix.as_str())
        .is_some_and(|rest| rest.starts_with(entry.name.as_str()))
}

/// Stable partition of `entries` with spelled-out entries first
pub fn rank_spelled_out_first<'a>(entries: Vec<&'a SymbolEntry>, word: &str) -> Vec<&'a SymbolEntry> {
    let (mut front, back): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|entry| is_spelled_out(entry, word));
    front.extend(back);
    front
}

/// Apply ranking and truncation according to `options`
pub fn apply_options<'a>(
    entries: Vec<&'a SymbolEntry>,
    word: &str,
    options: &MatchOptions,
) -> Vec<&'a SymbolEntry> {
    let entries = if options.rank_exact_first {
        rank_spelled_out_first(entries, word)
    } else {
        entries
    };

    truncate(entries, options)
}

/// Cut `entries` to `options.max_results`, keeping their order
pub fn truncate<'a>(mut entries: Vec<&'a SymbolEntry>, options: &MatchOptions) -> Vec<&'a SymbolEntry> {
    if let Some(max) = options.max_results {
        entries.truncate(max);
    }
    entries
}
