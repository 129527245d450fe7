//! JSON Schema rendering of resource schemas
//!
//! These are the object schemas embedded in the OpenAPI document: one shape
//! for create bodies, one for update bodies and one for returned records.

use super::types::{FieldType, ResourceSchema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSON Schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Object,
    Array,
}

/// Which shape of a resource to describe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaMode {
    /// POST body: every required field listed under `required`
    Create,
    /// PUT body: any subset of fields
    Update,
    /// Stored record: fields plus the server-assigned `id`
    Record,
}

/// JSON Schema property definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaProperty {
    #[serde(rename = "type")]
    pub json_type: JsonType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SchemaProperty {
    /// Create a string property
    pub fn string(description: impl Into<String>) -> Self {
        Self {
            json_type: JsonType::String,
            description: Some(description.into()),
        }
    }
}

/// Object schema with ordered-by-name properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    #[serde(rename = "type")]
    pub json_type: JsonType,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(default)]
    pub properties: BTreeMap<String, SchemaProperty>,
}

impl ObjectSchema {
    /// Create an empty object schema
    pub fn new() -> Self {
        Self {
            json_type: JsonType::Object,
            required: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Add a property
    pub fn add_property(&mut self, name: &str, property: SchemaProperty) {
        self.properties.insert(name.to_string(), property);
    }

    /// Add a required property name
    pub fn add_required(&mut self, name: &str) {
        if !self.is_required(name) {
            self.required.push(name.to_string());
        }
    }

    /// Check if a property is required
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|n| n == name)
    }

    /// Get a property
    pub fn get_property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.get(name)
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Array schema wrapping an item object schema
pub fn array_of(items: ObjectSchema) -> serde_json::Value {
    serde_json::json!({
        "type": JsonType::Array,
        "items": items.to_json(),
    })
}

impl ResourceSchema {
    /// Render this resource as a JSON object schema
    pub fn to_json_schema(&self, mode: SchemaMode) -> ObjectSchema {
        let mut schema = ObjectSchema::new();

        if mode == SchemaMode::Record {
            schema.add_property("id", SchemaProperty::string(self.id_description()));
        }

        for def in self.fields {
            let property = match def.field_type {
                FieldType::Text => SchemaProperty::string(def.description),
            };
            schema.add_property(def.name, property);

            if mode == SchemaMode::Create && def.required {
                schema.add_required(def.name);
            }
        }

        schema
    }
}
