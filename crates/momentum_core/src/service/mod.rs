//! Use-case layer over the domain model.
//!
//! # Responsibility
//! - `app_store`: own the object graph, its mutations and persistence.
//! - `insights`: derive dashboard and analytics summaries from a state.
//!
//! # Invariants
//! - Services never write storage except through the `BlobStore` seam.

pub mod app_store;
pub mod insights;
