//! SQL compiler - expression tree to parameterized WHERE fragment
//!
//! Every leaf value becomes a `?` placeholder. Parameters are collected in
//! depth-first, left-to-right order, which is also the textual order of the
//! placeholders, so positional binding maps one-to-one onto leaves.

use crate::tree::Tree;
use crate::value::Value;

/// Always-true predicate used for an empty child inside a combinator.
const TRUE_FRAGMENT: &str = "1 = 1";

/// A compiled filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compiled {
    pub fragment: String,
    pub params: Vec<Value>,
}

impl Compiled {
    /// True when the filter matches every row
    pub fn is_empty(&self) -> bool {
        self.fragment.is_empty()
    }

    /// `" WHERE <fragment>"`, or nothing for the empty filter
    pub fn where_clause(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.fragment)
        }
    }
}

/// Compile a tree. Pure and total.
pub fn compile(tree: &Tree) -> Compiled {
    let mut params = Vec::new();
    let fragment = render(tree, &mut params);
    Compiled { fragment, params }
}

fn render(tree: &Tree, params: &mut Vec<Value>) -> String {
    match tree {
        Tree::Leaf { attribute, operator, value } => {
            params.push(value.clone());
            format!("{} {} ?", attribute, operator.as_sql())
        }
        Tree::Node { combinator, children } => match children.as_slice() {
            [] => String::new(),
            [only] => render(only, params),
            _ => {
                let parts: Vec<String> = children
                    .iter()
                    .map(|child| {
                        let part = render(child, params);
                        if part.is_empty() {
                            TRUE_FRAGMENT.to_string()
                        } else {
                            part
                        }
                    })
                    .collect();
                let separator = format!(" {} ", combinator.as_sql());
                format!("({})", parts.join(separator.as_str()))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Operator, and, or};

    fn leaf(attr: &str, op: Operator, v: impl Into<Value>) -> Tree {
        Tree::leaf(attr, op, v)
    }

    #[test]
    fn test_empty_filter() {
        let compiled = compile(&Tree::all());
        assert!(compiled.is_empty());
        assert!(compiled.params.is_empty());
        assert_eq!(compiled.where_clause(), "");

        assert!(compile(&Tree::or([])).is_empty());
    }

    #[test]
    fn test_leaf() {
        let compiled = compile(&leaf("a", Operator::Lt, 10));
        assert_eq!(compiled.fragment, "a < ?");
        assert_eq!(compiled.params, vec![Value::Integer(10)]);
        assert_eq!(compiled.where_clause(), " WHERE a < ?");
    }

    #[test]
    fn test_like_is_bound_not_inlined() {
        let compiled = compile(&leaf("name", Operator::Like, "x' OR '1'='1"));
        assert_eq!(compiled.fragment, "name LIKE ?");
        assert_eq!(compiled.params, vec![Value::from("x' OR '1'='1")]);
    }

    #[test]
    fn test_single_child_passes_through() {
        let child = leaf("a", Operator::GtOrEq, 5);
        assert_eq!(compile(&and([child.clone()])), compile(&child));
        assert_eq!(compile(&or([and([child.clone()])])), compile(&child));
    }

    #[test]
    fn test_nested_nodes() {
        let tree = or([
            leaf("name", Operator::Eq, "alice"),
            and([leaf("age", Operator::GtOrEq, 21), leaf("age", Operator::LtOrEq, 150)]),
        ]);

        let compiled = compile(&tree);
        assert_eq!(compiled.fragment, "(name = ? OR (age >= ? AND age <= ?))");
        assert_eq!(
            compiled.params,
            vec![Value::from("alice"), Value::Integer(21), Value::Integer(150)]
        );
    }

    #[test]
    fn test_two_attribute_and() {
        let tree = and([leaf("a", Operator::GtOrEq, 1), leaf("b", Operator::Eq, "x")]);
        assert_eq!(compile(&tree).fragment, "(a >= ? AND b = ?)");
    }

    #[test]
    fn test_empty_child_inside_combinator_is_true() {
        let tree = or([Tree::all(), leaf("a", Operator::Eq, 1)]);
        let compiled = compile(&tree);
        assert_eq!(compiled.fragment, "(1 = 1 OR a = ?)");
        assert_eq!(compiled.params, vec![Value::Integer(1)]);
    }
}
