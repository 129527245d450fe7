//! Tests for the OpenAPI document

use super::*;
use crate::gate::ApiKeyGate;
use crate::schema::{ADMIN, ALL, ENGINEERING};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

fn document() -> serde_json::Value {
    build_document(&DocsInfo::new("http://localhost:3000"), &ALL)
}

#[test]
fn test_document_metadata() {
    let doc = document();

    assert_eq!(doc["openapi"], "3.0.0");
    assert_eq!(doc["info"]["title"], "Nuclear Power Plant API");
    assert_eq!(doc["info"]["version"], "1.0.0");
    assert_eq!(doc["servers"][0]["url"], "http://localhost:3000");
    assert_eq!(
        doc["components"]["securitySchemes"]["ApiKeyAuth"],
        json!({"type": "apiKey", "in": "header", "name": "X-API-KEY"})
    );
    assert_eq!(doc["security"], json!([{"ApiKeyAuth": []}]));
}

#[test]
fn test_document_covers_every_operation() {
    let doc = document();
    let paths = doc["paths"].as_object().unwrap();
    assert_eq!(paths.len(), 8);

    for schema in ALL {
        let base = schema.base_path();
        let collection = &paths[&base];
        assert!(collection.get("get").is_some(), "{base} get");
        assert!(collection.get("post").is_some(), "{base} post");

        let item = &paths[&format!("{base}/{{id}}")];
        for method in ["get", "put", "delete"] {
            assert!(item.get(method).is_some(), "{base}/{{id}} {method}");
        }
    }
}

#[test]
fn test_document_summaries_and_tags() {
    let doc = document();

    assert_eq!(
        doc["paths"]["/api/admin"]["get"]["summary"],
        "Retrieve a list of admins"
    );
    assert_eq!(
        doc["paths"]["/api/security"]["post"]["summary"],
        "Create a new security staff member"
    );
    assert_eq!(
        doc["paths"]["/api/engineering/{id}"]["put"]["summary"],
        "Update an engineering project by ID"
    );
    assert_eq!(
        doc["paths"]["/api/security/{id}"]["delete"]["summary"],
        "Delete a security staff member by ID"
    );
    assert_eq!(
        doc["tags"][0],
        json!({"name": "Admin", "description": "Admin department management"})
    );
    assert_eq!(doc["tags"].as_array().unwrap().len(), 4);
}

#[test]
fn test_document_request_and_response_shapes() {
    let doc = build_document(&DocsInfo::new("http://example"), &[&ADMIN, &ENGINEERING]);

    let create = &doc["paths"]["/api/admin"]["post"]["requestBody"]["content"]["application/json"]["schema"];
    assert_eq!(create["required"], json!(["name", "role"]));

    let update = &doc["paths"]["/api/engineering/{id}"]["put"]["requestBody"]["content"]["application/json"]["schema"];
    assert!(update.get("required").is_none());

    let record = &doc["paths"]["/api/engineering/{id}"]["get"]["responses"]["200"]["content"]["application/json"]["schema"];
    assert_eq!(record["properties"]["id"]["description"], "The project ID");

    let not_found = &doc["paths"]["/api/engineering/{id}"]["delete"]["responses"]["404"];
    assert_eq!(not_found["description"], "Project not found");

    assert!(doc["paths"].get("/api/security").is_none());
}

async fn fetch(app: axum::Router, uri: &str, key: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut request = Request::builder().uri(uri);
    if let Some(key) = key {
        request = request.header("X-API-KEY", key);
    }

    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_docs_router_gated() {
    let app = docs_router(document(), ApiKeyGate::new(Some("s3cr3t")));

    let (status, body) = fetch(app.clone(), DOCS_PATH, Some("s3cr3t")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, document());

    let (status, body) = fetch(app.clone(), "/api-docs/openapi.json", Some("s3cr3t")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["openapi"], "3.0.0");

    let (status, body) = fetch(app.clone(), DOCS_PATH, Some("S3cr3t")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"message": "Unauthorized"}));

    let (status, _) = fetch(app, DOCS_PATH, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_docs_router_leaves_unmatched_paths_ungated() {
    let app = docs_router(document(), ApiKeyGate::new(Some("s3cr3t")));

    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_docs_router_without_secret_never_admits() {
    let app = docs_router(document(), ApiKeyGate::new(None));

    let (status, _) = fetch(app.clone(), DOCS_PATH, Some("")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = fetch(app, DOCS_PATH, Some("anything")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
