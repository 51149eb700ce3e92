//! Domain models and DTOs.
//!
//! Each submodule contains:
//! - a `Deserialize` row struct with the store's snake_case column names
//! - a camelCase `Serialize` model returned by the API
//! - a `Deserialize` input DTO for creates and partial updates

pub mod notification;
pub mod partner;
pub mod statistics;
