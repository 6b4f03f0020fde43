//! Prefix matching of editor words against the symbol catalog
//!
//! Lookup rules, given the word before the cursor:
//! 1. Empty line: every global, unranked (the "show everything" case)
//! 2. Word without a dot: globals whose name starts with the word
//! 3. Word with a dot: members whose namespace prefix the word starts with
//!
//! Only member lookups are ranked; globals keep catalog order and are just
//! truncated to `max_results`.
//!
//! Rule 3 tests the prefix in the opposite direction to rule 2, so
//! `console.lo` offers every `console.` member and leaves narrowing to the
//! editor's own filtering.

use serde::Serialize;
use tracing::debug;

use super::catalog::{SymbolCatalog, SymbolEntry};
use super::context::LineContext;
use super::ranking::{MatchOptions, apply_options, truncate};
use crate::integration::datastore_hint::DatastoreHint;

/// Completion matcher over an injected, immutable catalog
#[derive(Debug, Clone)]
pub struct PrefixCompletionMatcher<'c> {
    catalog: &'c SymbolCatalog,
    options: MatchOptions,
}

/// Everything the editor needs to render suggestions for one keystroke
#[derive(Debug, Clone, Serialize)]
pub struct Suggestions<'c> {
    pub last_word: String,
    pub entries: Vec<&'c SymbolEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datastore: Option<DatastoreHint>,
}

impl<'c> PrefixCompletionMatcher<'c> {
    pub fn new(catalog: &'c SymbolCatalog) -> Self {
        Self::with_options(catalog, MatchOptions::default())
    }

    pub fn with_options(catalog: &'c SymbolCatalog, options: MatchOptions) -> Self {
        Self { catalog, options }
    }

    /// Matcher over the built-in catalog
    pub fn builtin() -> PrefixCompletionMatcher<'static> {
        PrefixCompletionMatcher::new(SymbolCatalog::builtin())
    }

    pub fn catalog(&self) -> &'c SymbolCatalog {
        self.catalog
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Candidates for `line` with the cursor at `column` (in characters)
    pub fn complete(&self, line: &str, column: usize) -> Vec<&'c SymbolEntry> {
        self.complete_context(&LineContext::new(line, column))
    }

    pub fn complete_context(&self, ctx: &LineContext<'_>) -> Vec<&'c SymbolEntry> {
        if ctx.is_empty_line() {
            return self.catalog.globals().iter().collect();
        }

        let word = ctx.last_word;
        let member_access = ctx.is_member_access();
        let matched: Vec<&'c SymbolEntry> = if member_access {
            self.catalog
                .members()
                .iter()
                .filter(|entry| word.starts_with(entry.prefix.as_str()))
                .collect()
        } else {
            self.catalog
                .globals()
                .iter()
                .filter(|entry| entry.name.starts_with(word))
                .collect()
        };

        debug!(word, member_access, matched = matched.len(), "completion lookup");

        if member_access {
            apply_options(matched, word, &self.options)
        } else {
            truncate(matched, &self.options)
        }
    }

    /// Candidates plus the datastore hint for the same line
    pub fn suggest(&self, line: &str, column: usize) -> Suggestions<'c> {
        let ctx = LineContext::new(line, column);
        Suggestions {
            last_word: ctx.last_word.to_string(),
            entries: self.complete_context(&ctx),
            datastore: DatastoreHint::detect(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[&SymbolEntry]) -> Vec<String> {
        entries.iter().map(|e| e.qualified_name()).collect()
    }

    fn catalog() -> SymbolCatalog {
        SymbolCatalog::new(
            vec![
                SymbolEntry::global("request"),
                SymbolEntry::global("response"),
                SymbolEntry::global("console"),
            ],
            vec![
                SymbolEntry::member("console.", "log"),
                SymbolEntry::member("console.", "warn"),
                SymbolEntry::member("request.", "body"),
            ],
        )
    }

    #[test]
    fn test_empty_line_returns_all_globals() {
        let catalog = catalog();
        let matcher = PrefixCompletionMatcher::new(&catalog);
        let entries = matcher.complete("", 0);
        assert_eq!(names(&entries), vec!["request", "response", "console"]);
    }

    #[test]
    fn test_global_prefix_filter() {
        let catalog = catalog();
        let matcher = PrefixCompletionMatcher::new(&catalog);
        assert_eq!(names(&matcher.complete("re", 2)), vec!["request", "response"]);
        assert_eq!(names(&matcher.complete("x = con", 7)), vec!["console"]);
    }

    #[test]
    fn test_globals_keep_catalog_order() {
        let catalog = SymbolCatalog::new(
            vec![SymbolEntry::global("fsx"), SymbolEntry::global("fs")],
            Vec::new(),
        );
        let matcher = PrefixCompletionMatcher::new(&catalog);
        assert_eq!(names(&matcher.complete("fs", 2)), vec!["fsx", "fs"]);

        let limited = PrefixCompletionMatcher::with_options(
            &catalog,
            MatchOptions {
                rank_exact_first: true,
                max_results: Some(1),
            },
        );
        assert_eq!(names(&limited.complete("fs", 2)), vec!["fsx"]);
    }

    #[test]
    fn test_global_filter_is_case_sensitive() {
        let catalog = catalog();
        let matcher = PrefixCompletionMatcher::new(&catalog);
        assert!(matcher.complete("Re", 2).is_empty());
    }

    #[test]
    fn test_member_prefix_filter() {
        let catalog = catalog();
        let matcher = PrefixCompletionMatcher::new(&catalog);
        assert_eq!(
            names(&matcher.complete("console.lo", 10)),
            vec!["console.log", "console.warn"]
        );
    }

    #[test]
    fn test_member_spelled_out_ranks_first() {
        let catalog = catalog();
        let matcher = PrefixCompletionMatcher::new(&catalog);
        assert_eq!(
            names(&matcher.complete("console.warn", 12)),
            vec!["console.warn", "console.log"]
        );

        let unranked = PrefixCompletionMatcher::with_options(&catalog, MatchOptions::unranked());
        assert_eq!(
            names(&unranked.complete("console.warn", 12)),
            vec!["console.log", "console.warn"]
        );
    }

    #[test]
    fn test_no_matches() {
        let catalog = catalog();
        let matcher = PrefixCompletionMatcher::new(&catalog);
        assert!(matcher.complete("zzz", 3).is_empty());
        assert!(matcher.complete("kv.get", 6).is_empty());
    }

    #[test]
    fn test_word_after_delimiter_is_empty() {
        let catalog = catalog();
        let matcher = PrefixCompletionMatcher::new(&catalog);
        // Empty word matches every global
        assert_eq!(matcher.complete("foo(", 4).len(), 3);
    }

    #[test]
    fn test_suggest_includes_datastore_hint() {
        let catalog = catalog();
        let matcher = PrefixCompletionMatcher::new(&catalog);
        let suggestions = matcher.suggest(r#"datastore.query("logs", req"#, 27);
        assert_eq!(suggestions.last_word, "req");
        assert_eq!(names(&suggestions.entries), vec!["request"]);
        assert_eq!(
            suggestions.datastore.and_then(|h| h.datastore).as_deref(),
            Some("logs")
        );
    }

    #[test]
    fn test_builtin_matcher() {
        let matcher = PrefixCompletionMatcher::builtin();
        let entries = matcher.complete("fs.", 3);
        assert!(!entries.is_empty());
        assert!(entries.iter().all(|e| e.prefix == "fs."));
    }
}
