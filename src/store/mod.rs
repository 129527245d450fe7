//! Record store adapters
//!
//! The CRUD handlers talk to storage only through the `RecordStore` trait.
//! Two real adapters exist - an embedded DuckDB database and a volatile
//! in-memory map - plus a stand-in that fails every call when the configured
//! store could not be opened.

mod engine;
mod memory;
mod types;
mod url;

pub use engine::DuckDbStore;
pub use memory::{MemoryStore, UnavailableStore};
pub use types::{Record, RecordId, RecordStore, SharedStore};
pub use url::{open_or_unavailable, StoreUrl};
