//! CLI module
//!
//! Command-line interface for the department registry.
//!
//! # Commands
//!
//! - `serve` - Start the HTTP API server
//! - `docs` - Print the OpenAPI document
//! - `resources` - List department resources and their fields
//! - `check` - Test the connection to the record store

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands};
pub use runner::Runner;
pub use server::{build_app, serve, ServerConfig};
