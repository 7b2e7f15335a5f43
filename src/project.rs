//! Covering-column projection
//!
//! Reads one scalar per declared attribute out of a record, keyed by the
//! attribute name. Values must already have the declared type: an `i64`
//! column never receives a string or a float, and a missing field is an
//! error rather than a NULL.

use crate::meta::TypeDescriptor;
use crate::value::{ScalarType, Value};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value as Json;

/// Values for the covering columns, in declaration order
pub fn project<T: Serialize + ?Sized>(record: &T, descriptor: &TypeDescriptor) -> Result<Vec<Value>> {
    let json = serde_json::to_value(record)?;
    let Json::Object(fields) = json else {
        return Err(Error::NotAnObject(descriptor.record_type().to_string()));
    };

    descriptor
        .attributes()
        .iter()
        .map(|attribute| {
            let field = fields.get(attribute.name).ok_or_else(|| Error::MissingField {
                record_type: descriptor.record_type().to_string(),
                attribute: attribute.name.to_string(),
            })?;
            scalar(attribute.name, attribute.value_type, field)
        })
        .collect()
}

fn scalar(name: &str, expected: ScalarType, field: &Json) -> Result<Value> {
    let value = match (expected, field) {
        (ScalarType::Integer, Json::Number(n)) => n.as_i64().map(Value::Integer),
        (ScalarType::Text, Json::String(s)) => Some(Value::Text(s.clone())),
        _ => None,
    };

    value.ok_or_else(|| Error::TypeMismatch {
        attribute: name.to_string(),
        expected,
        found: describe(field),
    })
}

fn describe(field: &Json) -> String {
    match field {
        Json::Null => "null".to_string(),
        Json::Bool(_) => "boolean".to_string(),
        Json::Number(n) if n.is_i64() => "integer".to_string(),
        Json::Number(n) => format!("number {}", n),
        Json::String(_) => "text".to_string(),
        Json::Array(_) => "array".to_string(),
        Json::Object(_) => "object".to_string(),
    }
}
