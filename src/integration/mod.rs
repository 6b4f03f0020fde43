//! Integration script editor support

pub mod completion;
pub mod datastore_hint;

pub use datastore_hint::{ColumnInfo, DatastoreHint, DatastoreListing, DatastoreOperation, ResolvedHint};
