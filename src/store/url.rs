//! Store connection strings

use super::engine::DuckDbStore;
use super::memory::{MemoryStore, UnavailableStore};
use super::types::SharedStore;
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Parsed store location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUrl {
    /// `memory://` - volatile, process-local
    Memory,
    /// `duckdb://<path>` or `duckdb://:memory:`
    DuckDb { location: String },
}

impl StoreUrl {
    /// Parse a store connection string
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();

        if url == "memory://" || url == "memory" {
            return Ok(StoreUrl::Memory);
        }

        if let Some(location) = url.strip_prefix("duckdb://") {
            if location.is_empty() {
                return Err(Error::config(
                    "duckdb:// store URL needs a file path or :memory:",
                ));
            }
            return Ok(StoreUrl::DuckDb {
                location: location.to_string(),
            });
        }

        Err(Error::config(format!(
            "Unsupported store URL '{url}' (expected memory:// or duckdb://<path>)"
        )))
    }

    /// Open the store, preparing the given collections
    pub fn open(&self, collections: &[&str]) -> Result<SharedStore> {
        match self {
            StoreUrl::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreUrl::DuckDb { location } => {
                Ok(Arc::new(DuckDbStore::open(location, collections)?))
            }
        }
    }
}

impl fmt::Display for StoreUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreUrl::Memory => write!(f, "memory://"),
            StoreUrl::DuckDb { location } => write!(f, "duckdb://{location}"),
        }
    }
}

/// Open the configured store, or fall back to an unavailable one.
///
/// A store that cannot be opened does not stop the server: the failure is
/// logged and every data operation afterwards answers with a store error.
pub fn open_or_unavailable(url: &str, collections: &[&str]) -> SharedStore {
    match StoreUrl::parse(url).and_then(|parsed| parsed.open(collections)) {
        Ok(store) => {
            tracing::info!("Connected to {} record store ({})", store.kind(), url);
            store
        }
        Err(e) => {
            tracing::error!("Could not connect to record store {}: {}", url, e);
            Arc::new(UnavailableStore::new(e.to_string()))
        }
    }
}
