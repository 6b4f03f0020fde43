//! Console configuration
//!
//! Settings are resolved in order:
//! 1. Explicit values (command-line flags)
//! 2. Environment variables (`NEXUS_CONSOLE_*`)
//! 3. Built-in defaults
//!
//! Invalid environment values are logged and ignored.

use std::path::PathBuf;

use crate::data::DEFAULT_DELIMITER;
use crate::integration::completion::{CatalogError, MatchOptions, SymbolCatalog};

pub const CATALOG_ENV: &str = "NEXUS_CONSOLE_CATALOG";
pub const RANKING_ENV: &str = "NEXUS_CONSOLE_RANKING";
pub const DELIMITER_ENV: &str = "NEXUS_CONSOLE_DELIMITER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Catalog embedded in the binary
    Builtin,
    /// JSON catalog file
    File(PathBuf),
}

impl CatalogSource {
    pub fn load(&self) -> Result<SymbolCatalog, CatalogError> {
        match self {
            Self::Builtin => Ok(SymbolCatalog::builtin().clone()),
            Self::File(path) => SymbolCatalog::load(path),
        }
    }
}

/// Values given explicitly, e.g. on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub catalog: Option<PathBuf>,
    pub rank: Option<bool>,
    pub max_results: Option<usize>,
    pub delimiter: Option<char>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub catalog: CatalogSource,
    pub match_options: MatchOptions,
    pub delimiter: char,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogSource::Builtin,
            match_options: MatchOptions::default(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl ConsoleConfig {
    /// Resolve configuration from overrides, then the process environment
    pub fn from_env_or_default(overrides: &ConfigOverrides) -> Self {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve configuration using `lookup` for environment values
    pub fn resolve(overrides: &ConfigOverrides, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = &overrides.catalog {
            config.catalog = CatalogSource::File(path.clone());
        } else if let Some(path) = lookup(CATALOG_ENV).filter(|p| !p.trim().is_empty()) {
            config.catalog = CatalogSource::File(PathBuf::from(path));
        }

        if let Some(rank) = overrides.rank {
            config.match_options.rank_exact_first = rank;
        } else if let Some(value) = lookup(RANKING_ENV) {
            match parse_bool(&value) {
                Some(rank) => config.match_options.rank_exact_first = rank,
                None => tracing::warn!(
                    "Invalid {} value '{}', using default: {}",
                    RANKING_ENV,
                    value,
                    config.match_options.rank_exact_first
                ),
            }
        }

        config.match_options.max_results = overrides.max_results;

        if let Some(delimiter) = overrides.delimiter {
            config.delimiter = delimiter;
        } else if let Some(value) = lookup(DELIMITER_ENV) {
            match parse_delimiter(&value) {
                Some(delimiter) => config.delimiter = delimiter,
                None => tracing::warn!(
                    "Invalid {} value '{}', using default: {:?}",
                    DELIMITER_ENV,
                    value,
                    config.delimiter
                ),
            }
        }

        config
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a single-character delimiter; `\t` and `tab` name the tab character
pub fn parse_delimiter(s: &str) -> Option<char> {
    if s == "\\t" || s.eq_ignore_ascii_case("tab") {
        return Some('\t');
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::resolve(&ConfigOverrides::default(), env(&[]));
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.delimiter, ',');
        assert!(config.match_options.rank_exact_first);
    }

    #[test]
    fn test_environment_values() {
        let config = ConsoleConfig::resolve(
            &ConfigOverrides::default(),
            env(&[
                (CATALOG_ENV, "/etc/nexus/catalog.json"),
                (RANKING_ENV, "off"),
                (DELIMITER_ENV, "tab"),
            ]),
        );
        assert_eq!(config.catalog, CatalogSource::File(PathBuf::from("/etc/nexus/catalog.json")));
        assert!(!config.match_options.rank_exact_first);
        assert_eq!(config.delimiter, '\t');
    }

    #[test]
    fn test_overrides_beat_environment() {
        let overrides = ConfigOverrides {
            catalog: Some(PathBuf::from("local.json")),
            rank: Some(true),
            max_results: Some(5),
            delimiter: Some(';'),
        };
        let config = ConsoleConfig::resolve(
            &overrides,
            env(&[(CATALOG_ENV, "env.json"), (RANKING_ENV, "false"), (DELIMITER_ENV, "|")]),
        );
        assert_eq!(config.catalog, CatalogSource::File(PathBuf::from("local.json")));
        assert!(config.match_options.rank_exact_first);
        assert_eq!(config.match_options.max_results, Some(5));
        assert_eq!(config.delimiter, ';');
    }

    #[test]
    fn test_invalid_environment_falls_back() {
        let config = ConsoleConfig::resolve(
            &ConfigOverrides::default(),
            env(&[(RANKING_ENV, "maybe"), (DELIMITER_ENV, ",,")]),
        );
        assert!(config.match_options.rank_exact_first);
        assert_eq!(config.delimiter, ',');
    }

    #[test]
    fn test_builtin_source_loads() {
        let catalog = CatalogSource::Builtin.load().unwrap();
        assert_eq!(&catalog, SymbolCatalog::builtin());
    }
}
