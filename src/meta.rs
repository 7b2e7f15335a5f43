//! Type descriptors - which fields of a record type are filterable
//!
//! Every stored record type has exactly one [`TypeDescriptor`], declared as a
//! `static`. It decides:
//! - the table name (the record type's identifier)
//! - the covering columns next to the `json` document column
//! - which attributes the query DSL exposes for that type
//!
//! Descriptors are validated in a `const fn`, so a bad declaration in a
//! `static` fails the build instead of failing at runtime.

use crate::value::ScalarType;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Name of the document column every table carries.
pub const JSON_COLUMN: &str = "json";

/// One filterable field of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub name: &'static str,
    pub value_type: ScalarType,
}

impl Attribute {
    pub const fn new(name: &'static str, value_type: ScalarType) -> Self {
        Self { name, value_type }
    }
}

/// Static description of a record type's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    record_type: &'static str,
    attributes: &'static [Attribute],
}

impl TypeDescriptor {
    /// Build a descriptor.
    ///
    /// # Panics
    ///
    /// If the record type or an attribute is not a plain SQL identifier
    /// (`[A-Za-z_][A-Za-z0-9_]*`), if an attribute is an SQLite keyword
    /// (columns are written unquoted), if two attributes share a name
    /// (case-insensitively), or if an attribute is called `json`.
    /// In a `static` initializer this is a compile error.
    pub const fn new(record_type: &'static str, attributes: &'static [Attribute]) -> Self {
        if !is_identifier(record_type) {
            panic!("record type name must be a plain SQL identifier");
        }
        let mut i = 0;
        while i < attributes.len() {
            let name = attributes[i].name;
            if !is_identifier(name) {
                panic!("attribute name must be a plain SQL identifier");
            }
            if eq_ignore_case(name, JSON_COLUMN) {
                panic!("attribute name `json` is reserved for the document column");
            }
            if is_keyword(name) {
                panic!("attribute name must not be an SQLite keyword");
            }
            let mut j = 0;
            while j < i {
                if eq_ignore_case(attributes[j].name, name) {
                    panic!("duplicate attribute name in type descriptor");
                }
                j += 1;
            }
            i += 1;
        }
        Self { record_type, attributes }
    }

    /// Identifier of the record type; also the table name
    pub const fn record_type(&self) -> &'static str {
        self.record_type
    }

    /// Attributes in declaration order
    pub const fn attributes(&self) -> &'static [Attribute] {
        self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&'static Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

const fn is_identifier(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() || bytes[0].is_ascii_digit() {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !(b.is_ascii_alphanumeric() || b == b'_') {
            return false;
        }
        i += 1;
    }
    true
}

/// SQLite keywords (sqlite3_keyword_name), matched case-insensitively.
const KEYWORDS: &[&str] = &[
    "ABORT", "ACTION", "ADD", "AFTER", "ALL", "ALTER", "ALWAYS", "ANALYZE", "AND",
    "AS", "ASC", "ATTACH", "AUTOINCREMENT", "BEFORE", "BEGIN", "BETWEEN", "BY",
    "CASCADE", "CASE", "CAST", "CHECK", "COLLATE", "COLUMN", "COMMIT", "CONFLICT",
    "CONSTRAINT", "CREATE", "CROSS", "CURRENT", "CURRENT_DATE", "CURRENT_TIME",
    "CURRENT_TIMESTAMP", "DATABASE", "DEFAULT", "DEFERRABLE", "DEFERRED", "DELETE",
    "DESC", "DETACH", "DISTINCT", "DO", "DROP", "EACH", "ELSE", "END", "ESCAPE",
    "EXCEPT", "EXCLUDE", "EXCLUSIVE", "EXISTS", "EXPLAIN", "FAIL", "FILTER",
    "FIRST", "FOLLOWING", "FOR", "FOREIGN", "FROM", "FULL", "GENERATED", "GLOB",
    "GROUP", "GROUPS", "HAVING", "IF", "IGNORE", "IMMEDIATE", "IN", "INDEX",
    "INDEXED", "INITIALLY", "INNER", "INSERT", "INSTEAD", "INTERSECT", "INTO",
    "IS", "ISNULL", "JOIN", "KEY", "LAST", "LEFT", "LIKE", "LIMIT", "MATCH",
    "MATERIALIZED", "NATURAL", "NO", "NOT", "NOTHING", "NOTNULL", "NULL", "NULLS",
    "OF", "OFFSET", "ON", "OR", "ORDER", "OTHERS", "OUTER", "OVER", "PARTITION",
    "PLAN", "PRAGMA", "PRECEDING", "PRIMARY", "QUERY", "RAISE", "RANGE",
    "RECURSIVE", "REFERENCES", "REGEXP", "REINDEX", "RELEASE", "RENAME", "REPLACE",
    "RESTRICT", "RETURNING", "RIGHT", "ROLLBACK", "ROW", "ROWS", "SAVEPOINT",
    "SELECT", "SET", "TABLE", "TEMP", "TEMPORARY", "THEN", "TIES", "TO",
    "TRANSACTION", "TRIGGER", "UNBOUNDED", "UNION", "UNIQUE", "UPDATE", "USING",
    "VACUUM", "VALUES", "VIEW", "VIRTUAL", "WHEN", "WHERE", "WINDOW", "WITH",
    "WITHOUT",
];

const fn is_keyword(name: &str) -> bool {
    let mut i = 0;
    while i < KEYWORDS.len() {
        if eq_ignore_case(name, KEYWORDS[i]) {
            return true;
        }
        i += 1;
    }
    false
}

const fn eq_ignore_case(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if !a[i].eq_ignore_ascii_case(&b[i]) {
            return false;
        }
        i += 1;
    }
    true
}

/// Binds a record type to its descriptor and to a typed DSL scope.
///
/// The implementing type doubles as the scope: its fields are
/// [`Attr`](crate::dsl::Attr) handles, and query closures receive
/// `&Self::SCOPE`. Usually implemented through [`meta!`](crate::meta!).
pub trait Meta: Sized + 'static {
    type Record: Serialize + DeserializeOwned;

    /// The scope handed to filter closures
    const SCOPE: Self;

    fn descriptor() -> &'static TypeDescriptor;
}

/// Declare a [`Meta`] for a record type.
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// pub struct Email {
///     id: i64,
///     address: String,
///     unread: i64,
/// }
///
/// doclite::meta! {
///     /// Filterable fields of [`Email`]
///     pub struct EmailMeta: Email {
///         address: String,
///     }
/// }
///
/// use doclite::Meta;
/// assert_eq!(EmailMeta::descriptor().record_type(), "Email");
/// ```
///
/// Columns are unquoted in the generated SQL, so keyword names do not build:
///
/// ```compile_fail
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Invoice {
///     order: i64,
/// }
///
/// doclite::meta! {
///     struct InvoiceMeta: Invoice {
///         order: i64,
///     }
/// }
///
/// use doclite::Meta;
/// InvoiceMeta::descriptor();
/// ```
#[macro_export]
macro_rules! meta {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident : $record:ident {
            $($field:ident : $ty:ty),* $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy)]
        $vis struct $name {
            $(pub $field: $crate::dsl::Attr<$ty>,)*
        }

        impl $crate::meta::Meta for $name {
            type Record = $record;

            const SCOPE: Self = Self {
                $($field: $crate::dsl::Attr::new(stringify!($field)),)*
            };

            fn descriptor() -> &'static $crate::meta::TypeDescriptor {
                const ATTRIBUTES: &[$crate::meta::Attribute] = &[$($crate::meta::Attribute::new(
                    stringify!($field),
                    <$ty as $crate::value::Scalar>::TYPE,
                )),*];
                static DESCRIPTOR: $crate::meta::TypeDescriptor =
                    $crate::meta::TypeDescriptor::new(stringify!($record), ATTRIBUTES);
                &DESCRIPTOR
            }
        }
    };
}
