//! The five CRUD operations over one collection

use crate::error::{Error, Result};
use crate::schema::{validate_create, validate_update, ResourceSchema};
use crate::store::{Record, RecordId, SharedStore};
use serde_json::{Map, Value};

/// CRUD contract bound to one resource schema
#[derive(Debug, Clone)]
pub struct CrudHandler {
    schema: &'static ResourceSchema,
    store: SharedStore,
}

impl CrudHandler {
    /// Create a handler for a schema over the shared store
    pub fn new(schema: &'static ResourceSchema, store: SharedStore) -> Self {
        Self { schema, store }
    }

    /// The schema this handler serves
    pub fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    fn collection(&self) -> &'static str {
        self.schema.collection
    }

    /// Validate and persist a new record
    pub async fn create(&self, body: &Map<String, Value>) -> Result<Record> {
        let fields = validate_create(self.schema, body)?;

        let record = self
            .store
            .insert(self.collection(), fields)
            .await
            .map_err(|e| self.fault("create", e).into_write_failure())?;

        tracing::info!(collection = self.collection(), id = %record.id, "Created record");
        Ok(record)
    }

    /// All records of this collection in storage order
    pub async fn list(&self) -> Result<Vec<Record>> {
        let records = self
            .store
            .find_all(self.collection())
            .await
            .map_err(|e| self.fault("list", e))?;

        tracing::debug!(collection = self.collection(), count = records.len(), "Listed records");
        Ok(records)
    }

    /// One record by id
    pub async fn get_by_id(&self, id: &str) -> Result<Record> {
        let id = self.parse_id(id)?;

        self.store
            .find_by_id(self.collection(), &id)
            .await
            .map_err(|e| self.fault("get", e))?
            .ok_or_else(|| self.not_found())
    }

    /// Merge a partial body into an existing record, returning the new state
    pub async fn update_by_id(&self, id: &str, body: &Map<String, Value>) -> Result<Record> {
        let id = self.parse_id(id).map_err(Error::into_write_failure)?;
        let patch = validate_update(self.schema, body)?;

        let record = self
            .store
            .update_by_id(self.collection(), &id, &patch)
            .await
            .map_err(|e| self.fault("update", e).into_write_failure())?
            .ok_or_else(|| self.not_found())?;

        tracing::info!(
            collection = self.collection(),
            id = %record.id,
            changed = patch.len(),
            "Updated record"
        );
        Ok(record)
    }

    /// Permanently remove a record
    pub async fn delete_by_id(&self, id: &str) -> Result<()> {
        let id = self.parse_id(id)?;

        let deleted = self
            .store
            .delete_by_id(self.collection(), &id)
            .await
            .map_err(|e| self.fault("delete", e))?;

        if !deleted {
            return Err(self.not_found());
        }

        tracing::info!(collection = self.collection(), id = %id, "Deleted record");
        Ok(())
    }

    fn parse_id(&self, id: &str) -> Result<RecordId> {
        id.parse().map_err(|e| self.fault("parse id", e))
    }

    fn not_found(&self) -> Error {
        Error::not_found(self.schema.entity)
    }

    /// Log a store-side failure before it is mapped to a response
    fn fault(&self, operation: &str, error: Error) -> Error {
        tracing::error!(
            collection = self.collection(),
            operation,
            "Record store failure: {}",
            error
        );
        error
    }
}
