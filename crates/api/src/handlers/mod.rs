//! Resource handlers.
//!
//! Each resource is one dispatch function over its closed method set (see
//! [`crate::resource`]), reached both as `/api/<resource>` (optionally with
//! `?id=`) and as `/api/<resource>/{id}`.

pub mod health;
pub mod notifications;
pub mod partners;
pub mod statistics;
pub mod upload;
