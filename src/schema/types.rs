//! Resource schema types
//!
//! A `ResourceSchema` is a static, declarative description of one department
//! collection: its path segment, the labels used in messages and docs, and
//! the ordered list of fields a record carries.

use std::collections::BTreeMap;

/// Primitive type of a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// UTF-8 text
    Text,
}

impl FieldType {
    /// Name used in JSON Schema / OpenAPI documents
    pub fn json_type_name(self) -> &'static str {
        match self {
            FieldType::Text => "string",
        }
    }

    /// Name used in cast failure messages
    pub fn display_name(self) -> &'static str {
        match self {
            FieldType::Text => "String",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.json_type_name())
    }
}

/// Definition of one field in a resource schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name as it appears on the wire
    pub name: &'static str,
    /// Primitive type
    pub field_type: FieldType,
    /// Must be present and non-empty
    pub required: bool,
    /// Human description for the API document
    pub description: &'static str,
}

impl FieldDef {
    /// Create a required text field
    pub const fn required_text(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Text,
            required: true,
            description,
        }
    }

    /// Create an optional text field
    pub const fn optional_text(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::Text,
            required: false,
            description,
        }
    }
}

/// Declarative contract for one resource type
#[derive(Debug, PartialEq, Eq)]
pub struct ResourceSchema {
    /// Collection name, also the path segment under `/api`
    pub collection: &'static str,
    /// Model name used in validation messages (e.g. "Engineering")
    pub model: &'static str,
    /// Label used in not-found messages (e.g. "Project")
    pub entity: &'static str,
    /// Lowercase subject used in id descriptions (e.g. "project")
    pub subject: &'static str,
    /// Singular noun phrase (e.g. "engineering project")
    pub singular: &'static str,
    /// Indefinite article for `singular` ("a" or "an")
    pub article: &'static str,
    /// Plural noun phrase (e.g. "engineering projects")
    pub plural: &'static str,
    /// Noun for a single returned item (e.g. "project", "staff member")
    pub item: &'static str,
    /// Documentation tag description
    pub tag_description: &'static str,
    /// Ordered field definitions
    pub fields: &'static [FieldDef],
}

impl ResourceSchema {
    /// Documentation tag (same as the model name)
    pub fn tag(&self) -> &'static str {
        self.model
    }

    /// Base path of the collection's routes
    pub fn base_path(&self) -> String {
        format!("/api/{}", self.collection)
    }

    /// Description of the id path parameter / property
    pub fn id_description(&self) -> String {
        format!("The {} ID", self.subject)
    }
}

/// Normalized field values of a record, keyed by field name
pub type Fields = BTreeMap<String, String>;

/// A validated partial update.
///
/// `Some(value)` sets the field, `None` removes it. Only optional fields can
/// ever be removed; the validator rejects clearing a required one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Patch {
    changes: BTreeMap<String, Option<String>>,
}

impl Patch {
    /// Create an empty patch
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.changes.insert(name.into(), Some(value.into()));
    }

    /// Remove a field
    pub fn unset(&mut self, name: impl Into<String>) {
        self.changes.insert(name.into(), None);
    }

    /// Check whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of fields touched
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Apply the patch onto stored field values
    pub fn apply(&self, fields: &mut Fields) {
        for (name, change) in &self.changes {
            match change {
                Some(value) => {
                    fields.insert(name.clone(), value.clone());
                }
                None => {
                    fields.remove(name);
                }
            }
        }
    }
}
