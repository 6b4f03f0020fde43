//! Datastore hints for the integration editor
//!
//! When the line under the cursor calls `datastore.insert(...)` or
//! `datastore.query(...)`, the editor shows the datastores the owner can
//! access. If the call already names a datastore (`datastore.query("logs"`),
//! the hint narrows to that datastore and lists its columns.
//!
//! Fetching the datastore listing is the caller's job; this module only
//! decides what to show for a given line and listing.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::debug;

use crate::data::Datatype;

static DATASTORE_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"datastore\.(insert|query)").expect("valid datastore call pattern"));

// The name ends at the first closing quote, not the last one on the line.
static NAMED_DATASTORE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"datastore\.(insert|query)\("([^"]*)""#).expect("valid named datastore call pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatastoreOperation {
    Insert,
    Query,
}

impl DatastoreOperation {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "insert" => Some(Self::Insert),
            "query" => Some(Self::Query),
            _ => None,
        }
    }
}

impl fmt::Display for DatastoreOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => f.write_str("insert"),
            Self::Query => f.write_str("query"),
        }
    }
}

/// Column record from the backend's datastore listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ColumnInfo {
    pub name: String,
    pub datatype: Datatype,
}

/// Datastore record from the backend's datastore listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatastoreListing {
    #[serde(rename = "UID", default)]
    pub uid: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cols: Vec<ColumnInfo>,
}

// The backend encodes a datastore without columns as `"Cols": null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ColumnInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ColumnInfo>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A datastore call detected on the current line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatastoreHint {
    pub operation: DatastoreOperation,
    /// Datastore named in the call, if any
    pub datastore: Option<String>,
}

/// What the editor should display for a hint once the listing is known
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedHint<'a> {
    pub datastores: &'a [DatastoreListing],
    /// Columns of the named datastore, when it exists in the listing
    pub columns: Option<&'a [ColumnInfo]>,
}

impl DatastoreHint {
    /// Detect a datastore call anywhere on `line`
    pub fn detect(line: &str) -> Option<Self> {
        let call = DATASTORE_CALL.captures(line)?;
        let mut hint = Self {
            operation: DatastoreOperation::parse(call.get(1)?.as_str())?,
            datastore: None,
        };

        if let Some(named) = NAMED_DATASTORE_CALL.captures(line) {
            if let Some(operation) = named.get(1).and_then(|m| DatastoreOperation::parse(m.as_str())) {
                hint.operation = operation;
            }
            hint.datastore = named.get(2).map(|m| m.as_str().to_string());
        }

        debug!("Datastore hint detected: {:?}", hint);
        Some(hint)
    }

    /// Select what to show from the backend's listing
    pub fn resolve<'a>(&self, listings: &'a [DatastoreListing]) -> ResolvedHint<'a> {
        let columns = self.datastore.as_deref().and_then(|name| {
            listings
                .iter()
                .find(|ds| ds.name == name)
                .map(|ds| ds.cols.as_slice())
        });
        ResolvedHint {
            datastores: listings,
            columns,
        }
    }
}
