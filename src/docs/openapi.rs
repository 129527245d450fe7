//! OpenAPI document generation

use crate::gate::{require_api_key, ApiKeyGate, API_KEY_HEADER};
use crate::schema::{array_of, ResourceSchema, SchemaMode};
use axum::routing::get;
use axum::{middleware, Json, Router};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Path serving the API document
pub const DOCS_PATH: &str = "/api-docs";

/// Top-level metadata of the API document
#[derive(Debug, Clone)]
pub struct DocsInfo {
    pub title: String,
    pub version: String,
    pub description: String,
    /// Base URL advertised under `servers`
    pub server_url: String,
}

impl DocsInfo {
    /// Default metadata for a server reachable at `server_url`
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            title: "Nuclear Power Plant API".to_string(),
            version: "1.0.0".to_string(),
            description: "API documentation for Nuclear Power Plant departments".to_string(),
            server_url: server_url.into(),
        }
    }
}

/// Build the full OpenAPI document for the given schemas
pub fn build_document(info: &DocsInfo, schemas: &[&ResourceSchema]) -> Value {
    let mut paths = Map::new();
    for schema in schemas {
        paths.insert(schema.base_path(), collection_path(schema));
        paths.insert(format!("{}/{{id}}", schema.base_path()), item_path(schema));
    }

    let tags: Vec<Value> = schemas
        .iter()
        .map(|s| json!({ "name": s.tag(), "description": s.tag_description }))
        .collect();

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": info.title,
            "version": info.version,
            "description": info.description,
        },
        "servers": [
            { "url": info.server_url, "description": "Local server" }
        ],
        "components": {
            "securitySchemes": {
                "ApiKeyAuth": {
                    "type": "apiKey",
                    "in": "header",
                    "name": API_KEY_HEADER,
                }
            }
        },
        "security": [ { "ApiKeyAuth": [] } ],
        "tags": tags,
        "paths": paths,
    })
}

/// GET list + POST create
fn collection_path(schema: &ResourceSchema) -> Value {
    let record = schema.to_json_schema(SchemaMode::Record);

    json!({
        "get": {
            "summary": format!("Retrieve a list of {}", schema.plural),
            "tags": [schema.tag()],
            "security": [ { "ApiKeyAuth": [] } ],
            "responses": {
                "200": json_response(&format!("A list of {}", schema.plural), array_of(record.clone())),
                "500": message_response("Server error"),
            }
        },
        "post": {
            "summary": format!("Create a new {}", schema.singular),
            "tags": [schema.tag()],
            "security": [ { "ApiKeyAuth": [] } ],
            "requestBody": {
                "required": true,
                "content": {
                    "application/json": {
                        "schema": schema.to_json_schema(SchemaMode::Create).to_json()
                    }
                }
            },
            "responses": {
                "201": json_response(&format!("The created {}", schema.item), record.to_json()),
                "400": message_response("Bad request"),
            }
        }
    })
}

/// GET one + PUT update + DELETE
fn item_path(schema: &ResourceSchema) -> Value {
    let record = schema.to_json_schema(SchemaMode::Record).to_json();
    let id_param = json!([{
        "in": "path",
        "name": "id",
        "schema": { "type": "string" },
        "required": true,
        "description": schema.id_description(),
    }]);
    let not_found = json!({
        "description": format!("{} not found", schema.entity),
        "content": { "text/plain": { "schema": { "type": "string" } } }
    });

    json!({
        "get": {
            "summary": format!("Retrieve a single {} by ID", schema.singular),
            "tags": [schema.tag()],
            "security": [ { "ApiKeyAuth": [] } ],
            "parameters": id_param,
            "responses": {
                "200": json_response(&format!("A single {}", schema.item), record.clone()),
                "404": not_found,
                "500": message_response("Server error"),
            }
        },
        "put": {
            "summary": format!("Update {} {} by ID", schema.article, schema.singular),
            "tags": [schema.tag()],
            "security": [ { "ApiKeyAuth": [] } ],
            "parameters": id_param,
            "requestBody": {
                "required": true,
                "content": {
                    "application/json": {
                        "schema": schema.to_json_schema(SchemaMode::Update).to_json()
                    }
                }
            },
            "responses": {
                "200": json_response(&format!("The updated {}", schema.item), record),
                "400": message_response("Bad request"),
                "404": not_found,
            }
        },
        "delete": {
            "summary": format!("Delete {} {} by ID", schema.article, schema.singular),
            "tags": [schema.tag()],
            "security": [ { "ApiKeyAuth": [] } ],
            "parameters": id_param,
            "responses": {
                "204": { "description": "No content" },
                "404": not_found,
                "500": message_response("Server error"),
            }
        }
    })
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn message_response(description: &str) -> Value {
    json_response(
        description,
        json!({
            "type": "object",
            "properties": { "message": { "type": "string" } }
        }),
    )
}

/// Routes serving the document, wrapped in the API key check
///
/// Only the document routes are gated; unmatched paths fall through untouched.
pub fn docs_router(document: Value, gate: ApiKeyGate) -> Router {
    let document = Arc::new(document);
    let handler = move || {
        let document = Arc::clone(&document);
        async move { Json(document.as_ref().clone()) }
    };

    Router::new()
        .route(DOCS_PATH, get(handler.clone()))
        .route(&format!("{DOCS_PATH}/openapi.json"), get(handler))
        .route_layer(middleware::from_fn_with_state(gate, require_api_key))
}
