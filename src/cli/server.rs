//! HTTP server mode for the department API

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::crud::CrudHandler;
use crate::docs::{build_document, docs_router, DocsInfo};
use crate::error::{Error, Result};
use crate::gate::ApiKeyGate;
use crate::schema::{collections, ALL};
use crate::store::{open_or_unavailable, SharedStore};

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Record store connection string
    pub store_url: String,
    /// Shared secret for the documentation endpoint
    pub api_key: Option<String>,
    /// Server URL advertised in the API document
    pub public_url: Option<String>,
}

impl ServerConfig {
    /// Advertised URL, defaulting to localhost on the configured port
    pub fn public_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }

    fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("store_url", &self.store_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("public_url", &self.public_url)
            .finish()
    }
}

/// Build the full application router
///
/// Mounts one CRUD router per department, the gated documentation routes
/// and `/health`.
pub fn build_app(store: SharedStore, gate: ApiKeyGate, info: &DocsInfo) -> Router {
    // Build CORS layer - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/health", get(health))
        .with_state(store.clone());

    for schema in ALL {
        app = app.merge(CrudHandler::new(schema, store.clone()).router());
    }

    app.merge(docs_router(build_document(info, &ALL), gate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig) -> Result<()> {
    let store = open_or_unavailable(&config.store_url, &collections());

    let gate = ApiKeyGate::new(config.api_key.as_deref());
    if !gate.is_configured() {
        tracing::warn!("No API key configured, documentation requests will be rejected");
    }

    let app = build_app(store, gate, &DocsInfo::new(config.public_url()));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Starting HTTP server on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health(State(store): State<SharedStore>) -> impl IntoResponse {
    Json(json!({ "status": "ok", "store": store.kind() }))
}
