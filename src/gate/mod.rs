//! Shared-secret gate for the API document
//!
//! A single stateless check: the `X-API-KEY` request header must equal the
//! configured secret byte for byte. An unset or empty secret admits nobody.

mod api_key;

pub use api_key::{require_api_key, ApiKeyGate, GateDecision, API_KEY_HEADER};

#[cfg(test)]
mod tests;
