//! Document store - typed insert / query / delete over a connector
//!
//! Every operation first makes sure the record type's table exists, then
//! issues exactly one statement:
//! - `insert`: append one row, document plus covering columns
//! - `query`: select the `json` column and deserialize every row
//! - `delete`: remove every row matching the filter
//!
//! Filters are validated against the record type's descriptor before they are
//! compiled, so an undeclared attribute or a mistyped value never reaches SQL.

use std::path::Path;
use crate::codec::{JsonSerializer, Serializer};
use crate::config::DocliteConfig;
use crate::meta::{JSON_COLUMN, Meta};
use crate::query::{compile, validate, Compiled};
use crate::storage::schema;
use crate::storage::{Connector, SqliteConnector};
use crate::tree::Tree;
use crate::{project, Error, Result};

/// Typed persistence over a [`Connector`]
pub struct DocumentStore<C = SqliteConnector, S = JsonSerializer> {
    connector: C,
    serializer: S,
}

impl DocumentStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::with_connector(SqliteConnector::open(path)?))
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::with_connector(SqliteConnector::open_in_memory()?))
    }

    pub fn from_config(config: &DocliteConfig) -> Result<Self> {
        Ok(Self::with_connector(SqliteConnector::from_config(config)?))
    }
}

impl<C: Connector> DocumentStore<C> {
    /// JSON documents over a custom connector
    pub fn with_connector(connector: C) -> Self {
        Self::new(connector, JsonSerializer)
    }
}

impl<C: Connector, S: Serializer> DocumentStore<C, S> {
    pub fn new(connector: C, serializer: S) -> Self {
        Self { connector, serializer }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Create the table for `M` if it does not exist yet
    pub fn ensure_table<M: Meta>(&self) -> Result<()> {
        self.connector.execute(&schema::create_table_sql(M::descriptor()), &[])
    }

    // ========== Insert ==========

    /// Append one record. Duplicates are not detected.
    pub fn insert<M: Meta>(&self, record: &M::Record) -> Result<()> {
        let descriptor = M::descriptor();
        self.ensure_table::<M>()?;

        let document = self.serializer.serialize(record)?;
        let columns = project::project(record, descriptor)?;

        self.connector
            .insert_row(&schema::insert_sql(descriptor), &document, &columns)?;
        tracing::debug!("inserted into {}", descriptor.record_type());
        Ok(())
    }

    /// Insert records one by one, stopping at the first failure.
    ///
    /// Not transactional: rows inserted before a failure stay.
    pub fn insert_all<M: Meta>(&self, records: &[M::Record]) -> Result<()> {
        for record in records {
            self.insert::<M>(record)?;
        }
        Ok(())
    }

    // ========== Query ==========

    /// Query with a filter built from `M`'s attributes.
    ///
    /// ```
    /// # use serde::{Deserialize, Serialize};
    /// # #[derive(Debug, Serialize, Deserialize)]
    /// # struct User { id: i64, lang: String }
    /// # doclite::meta! { struct UserMeta: User { id: i64, lang: String } }
    /// let store = doclite::DocumentStore::open_in_memory()?;
    /// store.insert::<UserMeta>(&User { id: 1, lang: "ru".to_string() })?;
    ///
    /// let users = store.query::<UserMeta>(|u| u.id.gt_or_eq(1) & u.lang.eq("ru"))?;
    /// assert_eq!(users.len(), 1);
    /// # Ok::<(), doclite::Error>(())
    /// ```
    pub fn query<M: Meta>(&self, filter: impl FnOnce(&M) -> Tree) -> Result<Vec<M::Record>> {
        self.query_tree::<M>(&filter(&M::SCOPE))
    }

    /// Query with a prebuilt tree
    pub fn query_tree<M: Meta>(&self, tree: &Tree) -> Result<Vec<M::Record>> {
        let descriptor = M::descriptor();
        self.ensure_table::<M>()?;
        let filter = self.compile_for::<M>(tree)?;

        let documents = self.connector.select_column(
            &schema::select_sql(descriptor, &filter),
            JSON_COLUMN,
            &filter.params,
        )?;
        tracing::debug!("{} rows from {}", documents.len(), descriptor.record_type());

        documents
            .iter()
            .enumerate()
            .map(|(index, document)| {
                self.serializer
                    .deserialize(document)
                    .map_err(|e| Error::Row { index, source: Box::new(e) })
            })
            .collect()
    }

    /// Every stored record of type `M`
    pub fn query_all<M: Meta>(&self) -> Result<Vec<M::Record>> {
        self.query_tree::<M>(&Tree::all())
    }

    /// Query, delivering the outcome to `complete`.
    ///
    /// `complete` runs exactly once, before this call returns, with either the
    /// records or the error.
    pub fn query_then<M: Meta>(
        &self,
        filter: impl FnOnce(&M) -> Tree,
        complete: impl FnOnce(Result<Vec<M::Record>>),
    ) {
        complete(self.query::<M>(filter));
    }

    // ========== Delete ==========

    /// Delete every row matching a filter built from `M`'s attributes
    pub fn delete<M: Meta>(&self, filter: impl FnOnce(&M) -> Tree) -> Result<()> {
        self.delete_tree::<M>(&filter(&M::SCOPE))
    }

    pub fn delete_tree<M: Meta>(&self, tree: &Tree) -> Result<()> {
        let descriptor = M::descriptor();
        self.ensure_table::<M>()?;
        let filter = self.compile_for::<M>(tree)?;

        self.connector
            .execute(&schema::delete_sql(descriptor, &filter), &filter.params)?;
        tracing::debug!("deleted from {} where {:?}", descriptor.record_type(), filter.fragment);
        Ok(())
    }

    fn compile_for<M: Meta>(&self, tree: &Tree) -> Result<Compiled> {
        validate(tree, M::descriptor())?;
        Ok(compile(tree))
    }
}
