//! Buy-list export.
//!
//! # Responsibility
//! - Render and write the human-readable purchase report.

pub mod report;
