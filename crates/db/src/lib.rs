//! Data access layer.
//!
//! Maps domain models to and from the hosted store's rows. Read paths never
//! fail: an unconfigured or failing store yields empty lists or default
//! statistics. Write paths return [`WriteError`] so callers can tell a
//! missing write credential from a rejected write.

pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;
pub mod supabase;

pub use store::{ObjectStorage, Store, StoreError, TableStore, WriteError};
pub use supabase::{EnvSummary, SupabaseConfig};
