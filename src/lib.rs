//! # Doclite - typed document persistence over SQLite
//!
//! Records are stored whole, as serialized documents, in one table per record
//! type. A few declared fields are copied into covering columns so they can be
//! filtered on.
//!
//! Doclite provides:
//! - Statically declared type descriptors ([`meta!`])
//! - Immutable boolean filter trees and a typed DSL to build them
//! - Compilation of filters into parameterized SQL, never inlining values
//! - A connector-agnostic document store with a bundled SQLite connector

pub mod value;
pub mod meta;
pub mod tree;
pub mod dsl;
pub mod query;
pub mod codec;
pub mod project;
pub mod storage;
pub mod store;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use value::{ScalarType, Value};
pub use meta::{Attribute, Meta, TypeDescriptor};
pub use tree::{Combinator, Operator, Tree, and, or};
pub use dsl::Attr;
pub use codec::{JsonSerializer, Serializer};
pub use storage::{Connector, SqliteConnector};
pub use store::DocumentStore;

/// Result type alias for Doclite operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Doclite operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown attribute `{attribute}` for {record_type}")]
    UnknownAttribute { record_type: String, attribute: String },

    #[error("Type mismatch for `{attribute}`: expected {expected}, found {found}")]
    TypeMismatch {
        attribute: String,
        expected: ScalarType,
        found: String,
    },

    #[error("Operator {operator} is not valid for {value_type} attribute `{attribute}`")]
    InvalidOperator {
        attribute: String,
        operator: Operator,
        value_type: ScalarType,
    },

    #[error("Record of type {record_type} has no field `{attribute}`")]
    MissingField { record_type: String, attribute: String },

    #[error("Record of type {0} does not serialize to an object")]
    NotAnObject(String),

    #[error("Row {index}: {source}")]
    Row {
        index: usize,
        source: Box<Error>,
    },

    #[error("Connector error: {0}")]
    Connector(String),
}
