//! Domain logic shared by the data access layer and the HTTP server.
//!
//! Everything here is pure: no I/O, no store access, no HTTP types.

pub mod error;
pub mod fields;
pub mod types;
pub mod upload;
pub mod validation;
