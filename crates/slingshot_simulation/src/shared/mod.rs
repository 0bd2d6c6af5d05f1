//! Shared: cross-cutting helpers
//!
//! - vector: move_toward, split_along_axis, ease_in_out

pub mod vector;
