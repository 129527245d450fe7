// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::too_many_lines)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Plant Registry
//!
//! HTTP registry for the departments of a nuclear power plant: admin,
//! engineering, operations and security staff records, each kept in its own
//! collection behind the same five CRUD operations.
//!
//! ## Features
//!
//! - **Uniform CRUD**: One generic handler, instantiated per department schema
//! - **Typed Validation**: Required fields checked before anything reaches storage
//! - **Pluggable Storage**: Embedded DuckDB or an in-memory store
//! - **Gated API Docs**: OpenAPI 3.0 document behind an `X-API-KEY` shared secret
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plant_registry::cli::build_app;
//! use plant_registry::docs::DocsInfo;
//! use plant_registry::gate::ApiKeyGate;
//! use plant_registry::store::open_or_unavailable;
//!
//! #[tokio::main]
//! async fn main() -> plant_registry::Result<()> {
//!     let store = open_or_unavailable("duckdb://data/plant.db", &plant_registry::schema::collections());
//!     let app = build_app(
//!         store,
//!         ApiKeyGate::new(Some("s3cr3t")),
//!         &DocsInfo::new("http://localhost:3000"),
//!     );
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        axum Router                           │
//! │  /api/admin   /api/engineering   /api/operations   /api/security
//! │  /api-docs (X-API-KEY)           /health                     │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴─────┬──────────────┬──────────┐
//! │    Schema    │    CRUD Handler    │     Gate     │   Docs   │
//! ├──────────────┼────────────────────┼──────────────┼──────────┤
//! │ Fields       │ create / list      │ ct compare   │ OpenAPI  │
//! │ Validation   │ get / update       │ 401 reject   │ 3.0      │
//! │ Patch        │ delete             │              │          │
//! └──────────────┴─────────┬──────────┴──────────────┴──────────┘
//!                          │
//!               RecordStore (DuckDB | memory)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the registry
pub mod error;

/// Department resource schemas and validation
pub mod schema;

/// Record store adapters
pub mod store;

/// Generic CRUD handler
pub mod crud;

/// Shared-secret gate for the documentation endpoint
pub mod gate;

/// OpenAPI document publisher
pub mod docs;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
