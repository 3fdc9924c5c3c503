//! Name search entry points.
//!
//! # Responsibility
//! - Provide literal prefix matching over item names.
//! - Keep query escaping inside core so callers cannot inject patterns.

pub mod prefix;
