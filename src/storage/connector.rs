//! Connector - the execution boundary
//!
//! The store hands finished SQL and positional parameters to a connector and
//! gets raw column strings back. Parsing documents happens upstream.

use crate::Result;
use crate::value::Value;

pub trait Connector {
    /// Run a statement that returns no rows.
    fn execute(&self, sql: &str, params: &[Value]) -> Result<()>;

    /// Run a parameterized insert. The first placeholder binds `document`,
    /// the remaining placeholders bind `params` in order.
    fn insert_row(&self, sql: &str, document: &str, params: &[Value]) -> Result<()>;

    /// Run a query and return the values of `column` as strings.
    fn select_column(&self, sql: &str, column: &str, params: &[Value]) -> Result<Vec<String>>;
}

impl<C: Connector + ?Sized> Connector for &C {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<()> {
        (**self).execute(sql, params)
    }

    fn insert_row(&self, sql: &str, document: &str, params: &[Value]) -> Result<()> {
        (**self).insert_row(sql, document, params)
    }

    fn select_column(&self, sql: &str, column: &str, params: &[Value]) -> Result<Vec<String>> {
        (**self).select_column(sql, column, params)
    }
}
