//! Repository layer owning the grocery collection.
//!
//! # Responsibility
//! - Define the single owner of in-memory items plus their persistence.
//! - Resolve validation and not-found conditions at this boundary, so
//!   callers never see storage parsing details.
//!
//! # Invariants
//! - Every successful mutating call persists the full collection before
//!   returning; on persist failure the in-memory change is rolled back.

pub mod grocery_repo;
