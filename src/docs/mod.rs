//! API documentation publisher
//!
//! Builds an OpenAPI 3.0 document from the department schemas and serves it
//! behind the shared-secret gate.

mod openapi;

pub use openapi::{build_document, docs_router, DocsInfo, DOCS_PATH};

#[cfg(test)]
mod tests;
