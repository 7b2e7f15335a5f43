//! Schema mapping - table and statement text derived from a type descriptor
//!
//! Each record type gets one table:
//! - `json TEXT`: the serialized record, authoritative
//! - one covering column per attribute, in declaration order

use crate::meta::{JSON_COLUMN, TypeDescriptor};
use crate::query::Compiled;
use crate::value::ScalarType;

/// Storage type of a covering column
pub fn column_type(value_type: ScalarType) -> &'static str {
    match value_type {
        ScalarType::Integer => "NUMBER",
        ScalarType::Text => "TEXT",
    }
}

/// Quoted table name, e.g. `[User]`
pub fn table_name(descriptor: &TypeDescriptor) -> String {
    format!("[{}]", descriptor.record_type())
}

/// `CREATE TABLE IF NOT EXISTS [T] (json TEXT, a NUMBER, b TEXT)`
pub fn create_table_sql(descriptor: &TypeDescriptor) -> String {
    let mut columns = vec![format!("{} TEXT", JSON_COLUMN)];
    columns.extend(
        descriptor
            .attributes()
            .iter()
            .map(|a| format!("{} {}", a.name, column_type(a.value_type))),
    );
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        table_name(descriptor),
        columns.join(", ")
    )
}

/// `INSERT INTO [T] (json, a, b) VALUES (?, ?, ?)`
pub fn insert_sql(descriptor: &TypeDescriptor) -> String {
    let mut columns = vec![JSON_COLUMN];
    columns.extend(descriptor.attributes().iter().map(|a| a.name));
    let placeholders = vec!["?"; columns.len()];
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table_name(descriptor),
        columns.join(", "),
        placeholders.join(", ")
    )
}

/// `SELECT json FROM [T] WHERE ...`
pub fn select_sql(descriptor: &TypeDescriptor, filter: &Compiled) -> String {
    format!(
        "SELECT {} FROM {}{}",
        JSON_COLUMN,
        table_name(descriptor),
        filter.where_clause()
    )
}

/// `DELETE FROM [T] WHERE ...`
pub fn delete_sql(descriptor: &TypeDescriptor, filter: &Compiled) -> String {
    format!("DELETE FROM {}{}", table_name(descriptor), filter.where_clause())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::Attribute;
    use crate::query::compile;
    use crate::tree::{Operator, Tree};

    const ATTRIBUTES: &[Attribute] = &[
        Attribute::new("a", ScalarType::Integer),
        Attribute::new("b", ScalarType::Text),
    ];

    static T: TypeDescriptor = TypeDescriptor::new("T", ATTRIBUTES);
    static BARE: TypeDescriptor = TypeDescriptor::new("Bare", &[]);

    #[test]
    fn test_create_table() {
        assert_eq!(
            create_table_sql(&T),
            "CREATE TABLE IF NOT EXISTS [T] (json TEXT, a NUMBER, b TEXT)"
        );
        assert_eq!(create_table_sql(&BARE), "CREATE TABLE IF NOT EXISTS [Bare] (json TEXT)");
    }

    #[test]
    fn test_insert() {
        assert_eq!(insert_sql(&T), "INSERT INTO [T] (json, a, b) VALUES (?, ?, ?)");
        assert_eq!(insert_sql(&BARE), "INSERT INTO [Bare] (json) VALUES (?)");
    }

    #[test]
    fn test_select_and_delete() {
        let filter = compile(&Tree::and([
            Tree::leaf("a", Operator::GtOrEq, 1),
            Tree::leaf("b", Operator::Eq, "x"),
        ]));
        assert_eq!(select_sql(&T, &filter), "SELECT json FROM [T] WHERE (a >= ? AND b = ?)");

        let filter = compile(&Tree::leaf("a", Operator::Lt, 10));
        assert_eq!(delete_sql(&T, &filter), "DELETE FROM [T] WHERE a < ?");

        let everything = compile(&Tree::all());
        assert_eq!(select_sql(&T, &everything), "SELECT json FROM [T]");
        assert_eq!(delete_sql(&T, &everything), "DELETE FROM [T]");
    }
}
