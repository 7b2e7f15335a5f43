//! Expression trees - the query filter model
//!
//! A filter is an immutable boolean tree:
//! - `Leaf`: `<attribute> <operator> <value>`
//! - `Node`: `AND` / `OR` over an ordered list of children
//!
//! Trees are schema-agnostic. Whether an attribute exists, or whether its
//! value has the declared type, is checked when a tree is compiled against a
//! [`TypeDescriptor`](crate::meta::TypeDescriptor).

use crate::value::Value;
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Comparison operator of a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Lt,
    LtOrEq,
    Gt,
    GtOrEq,
    /// SQL `LIKE`, only valid on text attributes
    Like,
}

impl Operator {
    /// SQL symbol for the operator
    pub fn as_sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Lt => "<",
            Operator::LtOrEq => "<=",
            Operator::Gt => ">",
            Operator::GtOrEq => ">=",
            Operator::Like => "LIKE",
        }
    }

    pub fn all() -> &'static [Operator] {
        &[
            Operator::Eq,
            Operator::Lt,
            Operator::LtOrEq,
            Operator::Gt,
            Operator::GtOrEq,
            Operator::Like,
        ]
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Boolean combinator of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A boolean predicate over the covering columns of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree {
    Leaf {
        attribute: String,
        operator: Operator,
        value: Value,
    },
    Node {
        combinator: Combinator,
        children: Vec<Tree>,
    },
}

impl Tree {
    pub fn leaf(attribute: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Tree::Leaf {
            attribute: attribute.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn node(combinator: Combinator, children: impl IntoIterator<Item = Tree>) -> Self {
        Tree::Node {
            combinator,
            children: children.into_iter().collect(),
        }
    }

    /// The empty filter: matches every row.
    pub fn all() -> Self {
        Tree::Node {
            combinator: Combinator::And,
            children: Vec::new(),
        }
    }

    pub fn and(children: impl IntoIterator<Item = Tree>) -> Self {
        Self::node(Combinator::And, children)
    }

    pub fn or(children: impl IntoIterator<Item = Tree>) -> Self {
        Self::node(Combinator::Or, children)
    }

    /// Leaves in depth-first, left-to-right order.
    ///
    /// This is the order in which their values are bound.
    pub fn leaves(&self) -> Vec<(&str, Operator, &Value)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<(&'a str, Operator, &'a Value)>) {
        match self {
            Tree::Leaf { attribute, operator, value } => out.push((attribute.as_str(), *operator, value)),
            Tree::Node { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

/// `a & b` is exactly `Node(And, [a, b])`; nested nodes are not flattened.
impl BitAnd for Tree {
    type Output = Tree;

    fn bitand(self, rhs: Tree) -> Tree {
        Tree::and([self, rhs])
    }
}

/// `a | b` is exactly `Node(Or, [a, b])`.
impl BitOr for Tree {
    type Output = Tree;

    fn bitor(self, rhs: Tree) -> Tree {
        Tree::or([self, rhs])
    }
}

/// Free-function form of [`Tree::and`], reads closer to the query it builds.
pub fn and(children: impl IntoIterator<Item = Tree>) -> Tree {
    Tree::and(children)
}

pub fn or(children: impl IntoIterator<Item = Tree>) -> Tree {
    Tree::or(children)
}
