//! Record and store adapter types

use crate::error::{Error, Result};
use crate::schema::{Fields, Patch};
use async_trait::async_trait;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Store-assigned record identifier
///
/// Rendered and parsed only as 32 lowercase hex characters, so each record
/// has exactly one path id. Random v4 ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let simple = s.len() == 32
            && s
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !simple {
            return Err(Error::invalid_id(s));
        }

        Uuid::try_parse(s)
            .map(Self)
            .map_err(|_| Error::invalid_id(s))
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One stored document: its id plus normalized field values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: RecordId,
    pub fields: Fields,
}

impl Record {
    /// Create a record
    pub fn new(id: RecordId, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Get a field value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Serialize field values as a stored document
    pub fn document(&self) -> Result<String> {
        serde_json::to_string(&self.fields)
            .map_err(|e| Error::store(format!("Failed to encode document: {e}")))
    }

    /// Rebuild a record from a stored document
    pub fn from_document(id: &str, document: &str) -> Result<Self> {
        let id = id.parse()?;
        let fields: Fields = serde_json::from_str(document)
            .map_err(|e| Error::store(format!("Corrupt document {id}: {e}")))?;
        Ok(Self { id, fields })
    }
}

// Flat wire form: {"id": "...", "<field>": "...", ...}
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("id", &self.id)?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Durable per-collection document storage
///
/// Each call is atomic for the single document it touches. Nothing spans
/// documents or collections.
#[async_trait]
pub trait RecordStore: Send + Sync + fmt::Debug {
    /// Short adapter name for logs and health output
    fn kind(&self) -> &'static str;

    /// Persist a new document and return it with its assigned id
    async fn insert(&self, collection: &str, fields: Fields) -> Result<Record>;

    /// All documents in insertion order
    async fn find_all(&self, collection: &str) -> Result<Vec<Record>>;

    /// One document, if present
    async fn find_by_id(&self, collection: &str, id: &RecordId) -> Result<Option<Record>>;

    /// Merge a patch into a document, returning the post-update state
    async fn update_by_id(
        &self,
        collection: &str,
        id: &RecordId,
        patch: &Patch,
    ) -> Result<Option<Record>>;

    /// Remove a document, returning whether one existed
    async fn delete_by_id(&self, collection: &str, id: &RecordId) -> Result<bool>;
}

/// Store handle shared by every handler
pub type SharedStore = Arc<dyn RecordStore>;
