//! Symbol catalog for integration script completion
//!
//! The catalog has two tiers:
//! - **globals**: top-level objects available to every integration (`console`, `fs`, ...)
//! - **members**: dotted sub-members keyed by their namespace prefix (`console.` + `log`)
//!
//! A catalog is immutable once built. The console ships a built-in catalog
//! (embedded JSON, see [`SymbolCatalog::builtin`]); deployments can load an
//! alternate one from a file with the same shape.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const BUILTIN_CATALOG_JSON: &str = include_str!("builtin_catalog.json");

static BUILTIN_CATALOG: Lazy<SymbolCatalog> = Lazy::new(|| {
    SymbolCatalog::from_json(BUILTIN_CATALOG_JSON).expect("embedded symbol catalog is valid JSON")
});

/// Errors raised while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read symbol catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid symbol catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Documentation shown next to a suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolReference {
    pub heading: String,
    pub kind: String,
    #[serde(default)]
    pub detail: String,
}

/// A single completion candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    /// Dotted namespace the entry lives under (`"console."`), empty for globals
    #[serde(default)]
    pub prefix: String,
    pub name: String,
    /// Text inserted by the editor; defaults to `name`
    #[serde(default)]
    pub value: String,
    /// Short hint shown beside the suggestion
    #[serde(default)]
    pub meta: String,
    #[serde(default)]
    pub score: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<SymbolReference>,
}

impl SymbolEntry {
    pub fn global(name: impl Into<String>) -> Self {
        Self::member("", name)
    }

    pub fn member(prefix: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            prefix: prefix.into(),
            value: name.clone(),
            name,
            meta: String::new(),
            score: 0,
            reference: None,
        }
    }

    /// Fully qualified path, e.g. `console.log`
    pub fn qualified_name(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }
}

/// Two-tier catalog of globals and dotted members
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolCatalog {
    #[serde(default)]
    globals: Vec<SymbolEntry>,
    #[serde(default)]
    members: Vec<SymbolEntry>,
}

impl SymbolCatalog {
    pub fn new(globals: Vec<SymbolEntry>, members: Vec<SymbolEntry>) -> Self {
        let mut catalog = Self { globals, members };
        catalog.fill_default_values();
        catalog
    }

    /// The catalog shipped with the console
    pub fn builtin() -> &'static SymbolCatalog {
        &BUILTIN_CATALOG
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let mut catalog: SymbolCatalog = serde_json::from_str(json)?;
        catalog.fill_default_values();
        debug!(
            globals = catalog.globals.len(),
            members = catalog.members.len(),
            "parsed symbol catalog"
        );
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!("Loaded symbol catalog from {:?}", path);
        Ok(catalog)
    }

    pub fn globals(&self) -> &[SymbolEntry] {
        &self.globals
    }

    pub fn members(&self) -> &[SymbolEntry] {
        &self.members
    }

    /// Members living directly under `prefix` (e.g. `"fs."`)
    pub fn members_of<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a SymbolEntry> + 'a {
        self.members.iter().filter(move |entry| entry.prefix == prefix)
    }

    /// Look up an entry by its qualified name (`console.log`, `fs`)
    pub fn find(&self, qualified: &str) -> Option<&SymbolEntry> {
        self.globals
            .iter()
            .chain(self.members.iter())
            .find(|entry| {
                qualified.len() == entry.prefix.len() + entry.name.len()
                    && qualified.starts_with(entry.prefix.as_str())
                    && qualified.ends_with(entry.name.as_str())
            })
    }

    fn fill_default_values(&mut self) {
        for entry in self.globals.iter_mut().chain(self.members.iter_mut()) {
            if entry.value.is_empty() {
                entry.value = entry.name.clone();
            }
        }
    }
}
