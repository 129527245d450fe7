//! API key check and its axum middleware

use crate::error::Error;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Header carrying the caller's token
pub const API_KEY_HEADER: &str = "X-API-KEY";

/// Outcome of evaluating one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Header present and equal to the secret
    Admitted,
    /// Header absent, unequal, or no secret configured
    Rejected,
}

/// Process-wide shared-secret check
#[derive(Clone, Default)]
pub struct ApiKeyGate {
    secret: Option<Arc<[u8]>>,
}

impl std::fmt::Debug for ApiKeyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl ApiKeyGate {
    /// Create a gate from an optional configured secret.
    ///
    /// An empty secret is treated the same as no secret.
    pub fn new(secret: Option<&str>) -> Self {
        let secret = secret
            .filter(|s| !s.is_empty())
            .map(|s| Arc::from(s.as_bytes()));
        Self { secret }
    }

    /// Whether a usable secret is configured
    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Compare a supplied token against the secret
    pub fn check_token(&self, token: Option<&[u8]>) -> GateDecision {
        match (&self.secret, token) {
            (Some(secret), Some(token)) if bool::from(secret.as_ref().ct_eq(token)) => {
                GateDecision::Admitted
            }
            _ => GateDecision::Rejected,
        }
    }

    /// Evaluate the request headers
    pub fn check(&self, headers: &HeaderMap) -> GateDecision {
        let token = headers.get(API_KEY_HEADER).map(|v| v.as_bytes());
        self.check_token(token)
    }
}

/// Middleware admitting only requests that carry the configured key
pub async fn require_api_key(
    State(gate): State<ApiKeyGate>,
    request: Request,
    next: Next,
) -> Response {
    match gate.check(request.headers()) {
        GateDecision::Admitted => next.run(request).await,
        GateDecision::Rejected => {
            tracing::warn!(
                path = %request.uri().path(),
                key_present = request.headers().contains_key(API_KEY_HEADER),
                "Rejected request to API documentation"
            );
            Error::Unauthorized.into_response()
        }
    }
}
