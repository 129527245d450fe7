//! In-process record stores
//!
//! `MemoryStore` keeps documents in a lock-protected map and backs
//! `memory://` URLs and the test suite. `UnavailableStore` stands in when the
//! configured store could not be opened at startup.

use super::types::{Record, RecordId, RecordStore};
use crate::error::{Error, Result};
use crate::schema::{Fields, Patch};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Volatile store keyed by collection name
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Documents per collection, in insertion order
    collections: RwLock<HashMap<String, Vec<Record>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<Record> {
        let record = Record::new(RecordId::generate(), fields);
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<Record>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn find_by_id(&self, collection: &str, id: &RecordId) -> Result<Option<Record>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.iter().find(|r| r.id == *id))
            .cloned())
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &RecordId,
        patch: &Patch,
    ) -> Result<Option<Record>> {
        let mut collections = self.collections.write().await;
        let Some(record) = collections
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|r| r.id == *id))
        else {
            return Ok(None);
        };

        patch.apply(&mut record.fields);
        Ok(Some(record.clone()))
    }

    async fn delete_by_id(&self, collection: &str, id: &RecordId) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let Some(records) = collections.get_mut(collection) else {
            return Ok(false);
        };

        match records.iter().position(|r| r.id == *id) {
            Some(index) => {
                records.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Store that fails every operation
///
/// Used when the configured store cannot be reached at startup so the
/// server keeps answering with store errors instead of exiting.
#[derive(Debug, Clone)]
pub struct UnavailableStore {
    reason: String,
}

impl UnavailableStore {
    /// Create an unavailable store with the startup failure reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn fail<T>(&self) -> Result<T> {
        Err(Error::store(format!(
            "Record store unavailable: {}",
            self.reason
        )))
    }
}

#[async_trait]
impl RecordStore for UnavailableStore {
    fn kind(&self) -> &'static str {
        "unavailable"
    }

    async fn insert(&self, _collection: &str, _fields: Fields) -> Result<Record> {
        self.fail()
    }

    async fn find_all(&self, _collection: &str) -> Result<Vec<Record>> {
        self.fail()
    }

    async fn find_by_id(&self, _collection: &str, _id: &RecordId) -> Result<Option<Record>> {
        self.fail()
    }

    async fn update_by_id(
        &self,
        _collection: &str,
        _id: &RecordId,
        _patch: &Patch,
    ) -> Result<Option<Record>> {
        self.fail()
    }

    async fn delete_by_id(&self, _collection: &str, _id: &RecordId) -> Result<bool> {
        self.fail()
    }
}
