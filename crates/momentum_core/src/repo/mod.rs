//! Persistence contracts for the application snapshot.
//!
//! # Responsibility
//! - Define the key-value blob store seam used by the application store.
//! - Isolate SQLite details from service code.

pub mod blob_repo;
