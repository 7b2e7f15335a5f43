//! Scalar values - the only things that live outside the document
//!
//! Covering columns and query parameters are restricted to a small set of
//! scalar types:
//! - `Integer`: stored as `NUMBER`, bound as a 64-bit integer
//! - `Text`: stored as `TEXT`, bound as a UTF-8 string

use std::fmt;

/// Declared type of a filterable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// Whole numbers, bound as `i64`
    Integer,
    /// UTF-8 strings
    Text,
}

impl ScalarType {
    /// Get the string representation of the scalar type
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::Integer => "integer",
            ScalarType::Text => "text",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed scalar bound to a `?` placeholder or stored in a covering column.
///
/// No `Display`: values reach SQL only as bound parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Integer(i64),
    Text(String),
}

impl Value {
    /// The scalar type this value binds as
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Value::Integer(_) => ScalarType::Integer,
            Value::Text(_) => ScalarType::Text,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Rust types that can back a filterable attribute.
///
/// The associated `TYPE` is what ends up in the table's DDL, so it has to be
/// a constant: descriptors are built in `static` initializers.
pub trait Scalar: Into<Value> {
    const TYPE: ScalarType;
}

impl Scalar for i64 {
    const TYPE: ScalarType = ScalarType::Integer;
}

impl Scalar for i32 {
    const TYPE: ScalarType = ScalarType::Integer;
}

impl Scalar for u32 {
    const TYPE: ScalarType = ScalarType::Integer;
}

impl Scalar for String {
    const TYPE: ScalarType = ScalarType::Text;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_types() {
        assert_eq!(Value::from(7i32).scalar_type(), ScalarType::Integer);
        assert_eq!(Value::from(7u32), Value::Integer(7));
        assert_eq!(Value::from("ru").scalar_type(), ScalarType::Text);
    }

    #[test]
    fn test_scalar_consts() {
        assert_eq!(<i64 as Scalar>::TYPE, ScalarType::Integer);
        assert_eq!(<String as Scalar>::TYPE, ScalarType::Text);
    }

    #[test]
    fn test_display() {
        assert_eq!(ScalarType::Text.to_string(), "text");
        assert_eq!(format!("{:?}", Value::from("it's")), "Text(\"it's\")");
    }
}
