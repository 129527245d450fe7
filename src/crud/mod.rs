//! Generic CRUD handler
//!
//! One `CrudHandler` per department, parameterized by a static
//! `ResourceSchema` and the shared store handle. The handler owns the
//! request contract (validation, status codes, error mapping) and exposes it
//! both as plain async methods and as an axum router.

mod handler;
mod routes;

pub use handler::CrudHandler;

#[cfg(test)]
mod tests;
