//! Query DSL - typed attribute handles
//!
//! ```
//! # use doclite::dsl::Attr;
//! let age: Attr<i64> = Attr::new("age");
//! let lang: Attr<String> = Attr::new("lang");
//!
//! let filter = age.gt_or_eq(50) & lang.eq("ru");
//! ```
//!
//! Handles only build [`Tree`]s. `age.gt(50)` is the same value as
//! `Tree::leaf("age", Operator::Gt, 50)`.

use crate::tree::{Operator, Tree};
use crate::value::Scalar;
use std::fmt;
use std::marker::PhantomData;

/// A filterable attribute of type `T`.
pub struct Attr<T> {
    name: &'static str,
    _type: PhantomData<fn() -> T>,
}

impl<T> Attr<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _type: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: Scalar> Attr<T> {
    fn compare(&self, operator: Operator, value: impl Into<T>) -> Tree {
        let value: T = value.into();
        Tree::leaf(self.name, operator, value)
    }

    pub fn eq(&self, value: impl Into<T>) -> Tree {
        self.compare(Operator::Eq, value)
    }

    pub fn lt(&self, value: impl Into<T>) -> Tree {
        self.compare(Operator::Lt, value)
    }

    pub fn lt_or_eq(&self, value: impl Into<T>) -> Tree {
        self.compare(Operator::LtOrEq, value)
    }

    pub fn gt(&self, value: impl Into<T>) -> Tree {
        self.compare(Operator::Gt, value)
    }

    pub fn gt_or_eq(&self, value: impl Into<T>) -> Tree {
        self.compare(Operator::GtOrEq, value)
    }
}

impl Attr<String> {
    /// SQL `LIKE`; `%` and `_` are wildcards
    pub fn like(&self, pattern: impl Into<String>) -> Tree {
        self.compare(Operator::Like, pattern)
    }
}

impl<T> Clone for Attr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Attr<T> {}

impl<T> fmt::Debug for Attr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Attr").field(&self.name).finish()
    }
}
