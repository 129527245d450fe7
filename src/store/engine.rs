//! DuckDB-backed record store
//!
//! One table per collection holding `(seq, id, doc)`. Documents are stored as
//! JSON text so every department shares the same table layout, and `seq`
//! comes from a per-table sequence to keep listings in insertion order.

use super::types::{Record, RecordId, RecordStore};
use crate::error::{Error, Result, ResultExt};
use crate::schema::{Fields, Patch};
use async_trait::async_trait;
use duckdb::{params, Connection};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

/// Record store using an embedded DuckDB database
///
/// Statements run synchronously on the calling runtime thread while holding
/// a `std::sync::Mutex`; the guard never crosses an `.await`.
pub struct DuckDbStore {
    /// DuckDB connection, one statement at a time
    conn: Mutex<Connection>,
    /// File path or `:memory:`
    location: String,
    /// Collections with a prepared table
    collections: HashSet<String>,
}

impl std::fmt::Debug for DuckDbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DuckDbStore")
            .field("location", &self.location)
            .field("collections", &self.collections)
            .finish_non_exhaustive()
    }
}

impl DuckDbStore {
    /// Open (or create) a store and prepare a table for each collection
    pub fn open(location: &str, collections: &[&str]) -> Result<Self> {
        let conn = if location == ":memory:" {
            Connection::open_in_memory()
        } else {
            if let Some(parent) = Path::new(location).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create store directory for {location}"))?;
                }
            }
            Connection::open(location)
        }
        .map_err(|e| Error::store(format!("Failed to open DuckDB store at {location}: {e}")))?;

        for collection in collections {
            Self::prepare_collection(&conn, collection)?;
        }

        tracing::debug!(
            "DuckDB store ready at {} ({} collections)",
            location,
            collections.len()
        );

        Ok(Self {
            conn: Mutex::new(conn),
            location: location.to_string(),
            collections: collections.iter().map(|c| (*c).to_string()).collect(),
        })
    }

    /// Where this store lives
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Create the sequence and table backing a collection
    fn prepare_collection(conn: &Connection, collection: &str) -> Result<()> {
        if collection.is_empty()
            || !collection
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(Error::config(format!(
                "Invalid collection name '{collection}'"
            )));
        }

        let ddl = format!(
            "CREATE SEQUENCE IF NOT EXISTS {collection}_seq;
             CREATE TABLE IF NOT EXISTS \"{collection}\" (
                 seq BIGINT NOT NULL DEFAULT nextval('{collection}_seq'),
                 id VARCHAR PRIMARY KEY,
                 doc VARCHAR NOT NULL
             );"
        );

        conn.execute_batch(&ddl)
            .map_err(|e| Error::store(format!("Failed to prepare collection {collection}: {e}")))
    }

    /// Run a closure against the connection for a known collection
    fn with_conn<T>(
        &self,
        collection: &str,
        f: impl FnOnce(&Connection, &str) -> Result<T>,
    ) -> Result<T> {
        if !self.collections.contains(collection) {
            return Err(Error::store(format!("Unknown collection '{collection}'")));
        }

        let conn = self
            .conn
            .lock()
            .map_err(|_| Error::store("DuckDB connection lock poisoned"))?;

        f(&conn, &format!("\"{collection}\""))
    }
}

/// Fetch one document by id on an already locked connection
fn select_one(conn: &Connection, table: &str, id: &RecordId) -> Result<Option<Record>> {
    let mut stmt = conn
        .prepare(&format!("SELECT id, doc FROM {table} WHERE id = ?"))
        .map_err(|e| Error::store(format!("Failed to prepare query: {e}")))?;

    let mut rows = stmt
        .query_map(params![id.to_string()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| Error::store(format!("Failed to query {table}: {e}")))?;

    let first = rows.next();
    match first {
        Some(row) => {
            let (id, doc) = row.map_err(|e| Error::store(format!("Failed to read row: {e}")))?;
            Record::from_document(&id, &doc).map(Some)
        }
        None => Ok(None),
    }
}

#[async_trait]
impl RecordStore for DuckDbStore {
    fn kind(&self) -> &'static str {
        "duckdb"
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<Record> {
        let record = Record::new(RecordId::generate(), fields);
        let doc = record.document()?;

        self.with_conn(collection, |conn, table| {
            conn.execute(
                &format!("INSERT INTO {table} (id, doc) VALUES (?, ?)"),
                params![record.id.to_string(), doc],
            )
            .map_err(|e| Error::store(format!("Failed to insert into {table}: {e}")))?;
            Ok(())
        })?;

        Ok(record)
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Record>> {
        self.with_conn(collection, |conn, table| {
            let mut stmt = conn
                .prepare(&format!("SELECT id, doc FROM {table} ORDER BY seq"))
                .map_err(|e| Error::store(format!("Failed to prepare query: {e}")))?;

            let rows: Vec<(String, String)> = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
                .map_err(|e| Error::store(format!("Failed to query {table}: {e}")))?
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| Error::store(format!("Failed to read rows: {e}")))?;

            rows.iter()
                .map(|(id, doc)| Record::from_document(id, doc))
                .collect()
        })
    }

    async fn find_by_id(&self, collection: &str, id: &RecordId) -> Result<Option<Record>> {
        self.with_conn(collection, |conn, table| select_one(conn, table, id))
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &RecordId,
        patch: &Patch,
    ) -> Result<Option<Record>> {
        // Read, merge and write under one lock so the document changes atomically
        self.with_conn(collection, |conn, table| {
            let Some(mut record) = select_one(conn, table, id)? else {
                return Ok(None);
            };

            patch.apply(&mut record.fields);
            let doc = record.document()?;

            conn.execute(
                &format!("UPDATE {table} SET doc = ? WHERE id = ?"),
                params![doc, id.to_string()],
            )
            .map_err(|e| Error::store(format!("Failed to update {table}: {e}")))?;

            Ok(Some(record))
        })
    }

    async fn delete_by_id(&self, collection: &str, id: &RecordId) -> Result<bool> {
        self.with_conn(collection, |conn, table| {
            let deleted = conn
                .execute(
                    &format!("DELETE FROM {table} WHERE id = ?"),
                    params![id.to_string()],
                )
                .map_err(|e| Error::store(format!("Failed to delete from {table}: {e}")))?;
            Ok(deleted > 0)
        })
    }
}
