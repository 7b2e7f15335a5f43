//! Document serialization
//!
//! The store never calls a serialization library directly. It is handed a
//! [`Serializer`] at construction; [`JsonSerializer`] is the default.

use crate::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub trait Serializer {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String>;

    fn deserialize<T: DeserializeOwned>(&self, document: &str) -> Result<T>;
}

/// Compact JSON via `serde_json`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    fn deserialize<T: DeserializeOwned>(&self, document: &str) -> Result<T> {
        Ok(serde_json::from_str(document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct City {
        name: String,
        location: Vec<f32>,
    }

    #[test]
    fn test_json_serializer() {
        let city = City { name: "Riga".to_string(), location: vec![56.5, 24.25] };
        let doc = JsonSerializer.serialize(&city).unwrap();
        assert!(doc.starts_with("{\"name\":\"Riga\""));
        assert_eq!(JsonSerializer.deserialize::<City>(&doc).unwrap(), city);
    }

    #[test]
    fn test_bad_document() {
        assert!(JsonSerializer.deserialize::<City>("{\"name\": 3}").is_err());
    }
}
