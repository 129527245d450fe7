//! Resource schema module
//!
//! Declarative field contracts for the four department collections.
//!
//! # Features
//!
//! - **Static Schemas**: One `ResourceSchema` per department, looked up by collection
//! - **Body Validation**: Required-field checks and text normalization for create/update
//! - **Partial Updates**: `Patch` values that merge onto stored records
//! - **JSON Schema Output**: Object schemas for the API document

mod json;
mod resources;
mod types;
mod validator;

pub use json::{array_of, JsonType, ObjectSchema, SchemaMode, SchemaProperty};
pub use resources::{collections, lookup, ADMIN, ALL, ENGINEERING, OPERATIONS, SECURITY};
pub use types::{FieldDef, FieldType, Fields, Patch, ResourceSchema};
pub use validator::{parse_body, validate_create, validate_update};
