//! Code completion for the integration script editor
//!
//! This module provides:
//! - A two-tier symbol catalog (globals and dotted members), built in or loaded from JSON
//! - Cursor context extraction (the word being typed on the current line)
//! - Prefix matching against the catalog
//! - Ranking that moves spelled-out members to the front

pub mod catalog;
pub mod context;
pub mod matcher;
pub mod ranking;

pub use catalog::{CatalogError, SymbolCatalog, SymbolEntry, SymbolReference};
pub use context::{LineContext, WORD_DELIMITERS, extract_last_word};
pub use matcher::{PrefixCompletionMatcher, Suggestions};
pub use ranking::{MatchOptions, apply_options, is_spelled_out, rank_spelled_out_first, truncate};
