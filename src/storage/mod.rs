//! Storage Layer - connector contract and SQLite backend
//!
//! One table per record type:
//! - `[<RecordType>](json, <attribute>...)`
//!
//! The `json` column holds the serialized record; the other columns are
//! filterable copies of its declared attributes.

pub mod connector;
pub mod schema;
pub mod sqlite;

pub use connector::Connector;
pub use sqlite::SqliteConnector;
