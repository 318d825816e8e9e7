//! Vehicle record store
//!
//! Holds every record as encoded bytes in memory, keyed by a store-assigned
//! identifier. Records are append-only: insert is the only mutation.
//!
//! # Invariants
//!
//! - Identifiers are unique, start at 1 and are never reused
//! - Insert takes the lock exclusively; get/list/stats share it
//! - Decoding happens inside the locked region; raw bytes never leave the store
//! - `list` is a fully materialized snapshot, ordered by id
//! - Corrupted entries are reported, never skipped

mod errors;
mod repository;
mod stats;

pub use errors::{Severity, StoreError, StoreResult};
pub use repository::{BinaryCarroStore, CarroRepository};
pub use stats::StorageStats;
