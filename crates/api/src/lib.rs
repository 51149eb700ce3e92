//! Admin and content API for the vehicle-inspection site.
//!
//! Exposes the building blocks (config, state, error handling, middleware,
//! routes) so integration tests and the binary entrypoint share the same
//! router.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod resource;
pub mod response;
pub mod routes;
pub mod state;
