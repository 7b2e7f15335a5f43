//! Tree validation against a type descriptor
//!
//! The compiler trusts its input. Filters coming from callers are checked
//! here first: every leaf must name a declared attribute, carry a value of
//! the declared type, and only use `LIKE` on text.

use crate::meta::TypeDescriptor;
use crate::tree::{Operator, Tree};
use crate::value::ScalarType;
use crate::{Error, Result};

pub fn validate(tree: &Tree, descriptor: &TypeDescriptor) -> Result<()> {
    for (name, operator, value) in tree.leaves() {
        let attribute = descriptor
            .attribute(name)
            .ok_or_else(|| Error::UnknownAttribute {
                record_type: descriptor.record_type().to_string(),
                attribute: name.to_string(),
            })?;

        if value.scalar_type() != attribute.value_type {
            return Err(Error::TypeMismatch {
                attribute: name.to_string(),
                expected: attribute.value_type,
                found: value.scalar_type().to_string(),
            });
        }

        if operator == Operator::Like && attribute.value_type != ScalarType::Text {
            return Err(Error::InvalidOperator {
                attribute: name.to_string(),
                operator,
                value_type: attribute.value_type,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::Attribute;

    const ATTRIBUTES: &[Attribute] = &[
        Attribute::new("id", ScalarType::Integer),
        Attribute::new("name", ScalarType::Text),
    ];

    static USER: TypeDescriptor = TypeDescriptor::new("User", ATTRIBUTES);

    #[test]
    fn test_valid_tree() {
        let tree = Tree::or([
            Tree::leaf("id", Operator::Lt, 3),
            Tree::leaf("name", Operator::Like, "a%"),
        ]);
        assert!(validate(&tree, &USER).is_ok());
        assert!(validate(&Tree::all(), &USER).is_ok());
    }

    #[test]
    fn test_unknown_attribute() {
        let err = validate(&Tree::leaf("age", Operator::Eq, 1), &USER).unwrap_err();
        assert!(matches!(err, Error::UnknownAttribute { ref attribute, .. } if attribute == "age"));
    }

    #[test]
    fn test_type_mismatch() {
        let tree = Tree::and([
            Tree::leaf("id", Operator::Eq, 1),
            Tree::leaf("name", Operator::Eq, 7),
        ]);
        let err = validate(&tree, &USER).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { expected: ScalarType::Text, .. }));
    }

    #[test]
    fn test_like_on_integer() {
        let err = validate(&Tree::leaf("id", Operator::Like, "1%"), &USER).unwrap_err();
        // the value type check fires first for a text value on an integer column
        assert!(matches!(err, Error::TypeMismatch { .. }));

        let err = validate(&Tree::leaf("id", Operator::Like, 1), &USER).unwrap_err();
        assert!(matches!(err, Error::InvalidOperator { operator: Operator::Like, .. }));
    }
}
