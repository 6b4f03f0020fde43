//! Header-aware view over a datastore query response
//!
//! The query endpoint writes a header row first (`UID` followed by the
//! datastore's column names), then one row per record. The explorer shows
//! only the records, so the header is split off here.

use serde::Serialize;

use super::csv::{self, DelimitedTable};

/// Name of the row identifier column the backend always writes first
pub const UID_COLUMN: &str = "UID";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryResult {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryResult {
    /// Decode a comma-delimited response body
    pub fn parse(text: &str) -> Self {
        Self::from_table(csv::tokenize(text))
    }

    pub fn from_table(table: DelimitedTable) -> Self {
        let mut rows = table.into_rows().into_iter();
        let header = rows.next().unwrap_or_default();
        Self {
            header,
            rows: rows.collect(),
        }
    }

    /// Header names other than the `UID` column
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.header
            .iter()
            .map(String::as_str)
            .filter(|name| *name != UID_COLUMN)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Field of `row` under `column`, `None` for short (ragged) rows
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }

    /// Values of the `UID` column in row order
    pub fn uids(&self) -> Vec<&str> {
        match self.column_index(UID_COLUMN) {
            Some(index) => self
                .rows
                .iter()
                .filter_map(|row| row.get(index).map(String::as_str))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_split_from_rows() {
        let result = QueryResult::parse("UID,name,score\n1,bob,10\n2,\"smith, j\",7\n");
        assert_eq!(result.header, vec!["UID", "name", "score"]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.value(1, "name"), Some("smith, j"));
        assert_eq!(result.uids(), vec!["1", "2"]);
        assert_eq!(result.columns().collect::<Vec<_>>(), vec!["name", "score"]);
    }

    #[test]
    fn test_header_only() {
        let result = QueryResult::parse("UID,name\n");
        assert_eq!(result.header, vec!["UID", "name"]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_ragged_row_lookup() {
        let result = QueryResult::parse("UID,a,b\n1,x");
        assert_eq!(result.value(0, "a"), Some("x"));
        assert_eq!(result.value(0, "b"), None);
        assert_eq!(result.value(0, "missing"), None);
        assert_eq!(result.value(5, "a"), None);
    }

    #[test]
    fn test_empty_table() {
        let result = QueryResult::from_table(DelimitedTable::default());
        assert!(result.header.is_empty());
        assert!(result.is_empty());
        assert!(result.uids().is_empty());
    }
}
