//! Domain model for grocery entries.
//!
//! # Responsibility
//! - Define the canonical item record shared by repository, store and export.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - Every item is identified by a stable [`item::ItemId`].
//! - No invalid item can be constructed or produced by an edit.

pub mod item;
