//! SQLite connector implementation

use std::path::Path;
use std::time::Duration;
use rusqlite::types::{ToSql, ToSqlOutput};
use rusqlite::{Connection, params_from_iter};
use crate::Result;
use crate::config::DocliteConfig;
use crate::value::Value;
use super::connector::Connector;

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Integer(v) => ToSqlOutput::from(*v),
            Value::Text(s) => ToSqlOutput::from(s.as_str()),
        })
    }
}

/// Connector over a single `rusqlite` connection
pub struct SqliteConnector {
    conn: Connection,
}

impl SqliteConnector {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Open the database named by `config`, in memory when none is set
    pub fn from_config(config: &DocliteConfig) -> Result<Self> {
        let connector = match config.database_file() {
            Some(path) => Self::open(path)?,
            None => Self::open_in_memory()?,
        };
        if let Some(ms) = config.busy_timeout_ms {
            connector.conn.busy_timeout(Duration::from_millis(ms))?;
        }
        Ok(connector)
    }

    /// Names of all user tables
    pub fn tables(&self) -> Result<Vec<String>> {
        self.select_column(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            "name",
            &[],
        )
    }
}

impl Connector for SqliteConnector {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<()> {
        tracing::debug!("execute: {} {:?}", sql, params);
        self.conn.execute(sql, params_from_iter(params.iter()))?;
        Ok(())
    }

    fn insert_row(&self, sql: &str, document: &str, params: &[Value]) -> Result<()> {
        tracing::debug!("insert: {} {:?}", sql, params);
        let mut bound: Vec<&dyn ToSql> = Vec::with_capacity(params.len() + 1);
        bound.push(&document);
        bound.extend(params.iter().map(|v| v as &dyn ToSql));

        let mut stmt = self.conn.prepare(sql)?;
        stmt.execute(bound.as_slice())?;
        Ok(())
    }

    fn select_column(&self, sql: &str, column: &str, params: &[Value]) -> Result<Vec<String>> {
        tracing::debug!("select: {} {:?}", sql, params);
        let mut stmt = self.conn.prepare(sql)?;
        let index = stmt.column_index(column)?;

        let values = stmt
            .query_map(params_from_iter(params.iter()), |row| row.get::<_, String>(index))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(values)
    }
}
