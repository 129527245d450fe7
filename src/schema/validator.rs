//! Request body validation against a resource schema
//!
//! Bodies are normalized the way a strict document mapper would: unknown
//! keys are dropped, numbers and booleans are cast to text, `null` counts as
//! absent, and nested values fail with a cast message.

use super::types::{FieldDef, FieldType, Fields, Patch, ResourceSchema};
use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Outcome of normalizing one supplied value
enum Normalized {
    Present(String),
    Absent,
    CastFailed,
}

/// Parse a raw request body into a JSON object
pub fn parse_body(body: &[u8]) -> Result<Map<String, Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|e| Error::validation(format!("Invalid JSON body: {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::validation(format!(
            "Request body must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Validate a create body, returning the normalized field values
pub fn validate_create(schema: &ResourceSchema, body: &Map<String, Value>) -> Result<Fields> {
    let mut fields = Fields::new();
    let mut failures = Vec::new();

    for def in schema.fields {
        match normalize(def, body.get(def.name)) {
            Normalized::Present(text) if text.is_empty() && def.required => {
                failures.push(required_message(def));
            }
            Normalized::Present(text) => {
                fields.insert(def.name.to_string(), text);
            }
            Normalized::Absent if def.required => failures.push(required_message(def)),
            Normalized::Absent => {}
            Normalized::CastFailed => failures.push(cast_message(def, body.get(def.name))),
        }
    }

    if failures.is_empty() {
        Ok(fields)
    } else {
        Err(failure(schema, &failures))
    }
}

/// Validate an update body, returning the patch to apply
///
/// Only keys present in the body are touched. Clearing a required field
/// (empty string or `null`) fails.
pub fn validate_update(schema: &ResourceSchema, body: &Map<String, Value>) -> Result<Patch> {
    let mut patch = Patch::new();
    let mut failures = Vec::new();

    for def in schema.fields {
        let Some(raw) = body.get(def.name) else {
            continue;
        };

        match normalize(def, Some(raw)) {
            Normalized::Present(text) if text.is_empty() && def.required => {
                failures.push(required_message(def));
            }
            Normalized::Present(text) => patch.set(def.name, text),
            Normalized::Absent if def.required => failures.push(required_message(def)),
            Normalized::Absent => patch.unset(def.name),
            Normalized::CastFailed => failures.push(cast_message(def, Some(raw))),
        }
    }

    if failures.is_empty() {
        Ok(patch)
    } else {
        Err(failure(schema, &failures))
    }
}

fn normalize(def: &FieldDef, value: Option<&Value>) -> Normalized {
    match (def.field_type, value) {
        (_, None | Some(Value::Null)) => Normalized::Absent,
        (FieldType::Text, Some(Value::String(s))) => Normalized::Present(s.clone()),
        (FieldType::Text, Some(Value::Number(n))) => Normalized::Present(n.to_string()),
        (FieldType::Text, Some(Value::Bool(b))) => Normalized::Present(b.to_string()),
        (FieldType::Text, Some(Value::Array(_) | Value::Object(_))) => Normalized::CastFailed,
    }
}

fn required_message(def: &FieldDef) -> String {
    format!("{name}: Path `{name}` is required.", name = def.name)
}

fn cast_message(def: &FieldDef, value: Option<&Value>) -> String {
    let shown = value.map(Value::to_string).unwrap_or_default();
    format!(
        "{name}: Cast to {ty} failed for value \"{shown}\" (type {kind}) at path \"{name}\"",
        name = def.name,
        ty = def.field_type.display_name(),
        kind = value.map_or("undefined", json_kind),
    )
}

fn failure(schema: &ResourceSchema, failures: &[String]) -> Error {
    Error::validation(format!(
        "{} validation failed: {}",
        schema.model,
        failures.join(", ")
    ))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}
