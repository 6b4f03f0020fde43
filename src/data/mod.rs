//! Datastore explorer support: query-result decoding and column metadata

pub mod csv;
pub mod datatype;
pub mod query_result;

pub use csv::{DelimitedTable, DEFAULT_DELIMITER, tokenize, tokenize_with_delimiter};
pub use datatype::Datatype;
pub use query_result::{QueryResult, UID_COLUMN};
