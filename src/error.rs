//! Error types for the plant registry
//!
//! This module defines the error hierarchy for the whole service.
//! All public APIs return `Result<T, Error>` where Error is defined here,
//! and every variant knows the HTTP response it maps to.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// The main error type for the plant registry
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Client Errors
    // ============================================================================
    /// Input failed the resource schema, or the store rejected a write
    #[error("{message}")]
    Validation { message: String },

    /// No record with the requested id in the targeted collection
    #[error("{entity} not found")]
    NotFound { entity: String },

    /// Shared-secret header missing or mismatched
    #[error("Unauthorized")]
    Unauthorized,

    // ============================================================================
    // Store Errors
    // ============================================================================
    /// The record store is unreachable or returned an unexpected fault
    #[error("{message}")]
    Store { message: String },

    /// The id is not a valid store identifier
    #[error("Cast to record id failed for value \"{id}\"")]
    InvalidId { id: String },

    // ============================================================================
    // Startup Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error for an entity label (e.g. "Admin", "Staff")
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create an invalid id error
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId { id: id.into() }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error is a store-class fault
    pub fn is_store_fault(&self) -> bool {
        matches!(self, Error::Store { .. } | Error::InvalidId { .. })
    }

    /// Check if this error is retryable
    ///
    /// Only plain store faults are; a malformed id fails the same way every time.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Store { .. })
    }

    /// Reclassify a failed store write as a validation error.
    ///
    /// Create and update report any failure of the write itself, including
    /// an id the store cannot cast, as 400. Missing records keep their 404.
    #[must_use]
    pub fn into_write_failure(self) -> Self {
        match self {
            Error::Store { message } => Error::Validation { message },
            invalid @ Error::InvalidId { .. } => Error::validation(invalid.to_string()),
            other => other,
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation { .. } | Error::JsonParse(_) => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::Store { .. }
            | Error::InvalidId { .. }
            | Error::Config { .. }
            | Error::Io(_)
            | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            // Not-found answers are plain text
            Error::NotFound { .. } => (status, self.to_string()).into_response(),
            _ => (status, Json(json!({ "message": self.to_string() }))).into_response(),
        }
    }
}

/// Result type alias for the plant registry
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
