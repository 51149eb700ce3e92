//! Request-level policy shared by every resource.
//!
//! - [`auth::AdminStatus`] -- Shared-secret admin check, as an extractor.
//! - [`cors::cors`] -- CORS headers on every response and the `OPTIONS` short-circuit.

pub mod auth;
pub mod cors;
