//! Tests for the shared-secret gate

use super::*;
use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::routing::get;
use axum::{middleware, Router};
use test_case::test_case;
use tower::ServiceExt;

#[test_case(Some("s3cr3t"), Some("s3cr3t"), GateDecision::Admitted ; "exact match")]
#[test_case(Some("s3cr3t"), Some("S3cr3t"), GateDecision::Rejected ; "case differs")]
#[test_case(Some("s3cr3t"), Some("s3cr3t "), GateDecision::Rejected ; "trailing space")]
#[test_case(Some("s3cr3t"), Some("s3cr"), GateDecision::Rejected ; "prefix only")]
#[test_case(Some("s3cr3t"), Some(""), GateDecision::Rejected ; "empty header")]
#[test_case(Some("s3cr3t"), None, GateDecision::Rejected ; "header absent")]
#[test_case(None, Some(""), GateDecision::Rejected ; "unset secret empty header")]
#[test_case(None, Some("anything"), GateDecision::Rejected ; "unset secret")]
#[test_case(Some(""), Some(""), GateDecision::Rejected ; "empty secret empty header")]
#[test_case(Some(""), None, GateDecision::Rejected ; "empty secret no header")]
fn test_gate_decision(secret: Option<&str>, header: Option<&str>, expected: GateDecision) {
    let gate = ApiKeyGate::new(secret);

    let mut headers = HeaderMap::new();
    if let Some(value) = header {
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(value).unwrap());
    }

    assert_eq!(gate.check(&headers), expected);
}

#[test]
fn test_gate_non_utf8_header_rejected() {
    let gate = ApiKeyGate::new(Some("s3cr3t"));
    let mut headers = HeaderMap::new();
    headers.insert(
        API_KEY_HEADER,
        HeaderValue::from_bytes(&[0xfa, 0xfb]).unwrap(),
    );
    assert_eq!(gate.check(&headers), GateDecision::Rejected);
}

#[test]
fn test_gate_header_name_case_insensitive() {
    let gate = ApiKeyGate::new(Some("s3cr3t"));
    let mut headers = HeaderMap::new();
    headers.insert("x-api-key", HeaderValue::from_static("s3cr3t"));
    assert_eq!(gate.check(&headers), GateDecision::Admitted);
}

#[test]
fn test_gate_is_configured() {
    assert!(ApiKeyGate::new(Some("k")).is_configured());
    assert!(!ApiKeyGate::new(Some("")).is_configured());
    assert!(!ApiKeyGate::new(None).is_configured());
    assert!(!ApiKeyGate::default().is_configured());
}

#[test]
fn test_gate_debug_hides_secret() {
    let gate = ApiKeyGate::new(Some("s3cr3t"));
    assert!(!format!("{gate:?}").contains("s3cr3t"));
}

fn guarded_router(gate: ApiKeyGate) -> Router {
    Router::new()
        .route("/docs", get(|| async { "documented" }))
        .layer(middleware::from_fn_with_state(gate, require_api_key))
}

#[tokio::test]
async fn test_middleware_admits_matching_key() {
    let app = guarded_router(ApiKeyGate::new(Some("s3cr3t")));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/docs")
                .header(API_KEY_HEADER, "s3cr3t")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"documented");
}

#[tokio::test]
async fn test_middleware_rejects_with_message() {
    let app = guarded_router(ApiKeyGate::new(Some("s3cr3t")));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/docs")
                .header(API_KEY_HEADER, "wrong")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({"message": "Unauthorized"}));
}
