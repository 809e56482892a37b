//! Backends module - File system work
//!
//! Provides:
//! - count: Per-file line counting with comment stripping
//! - scan: Tree walking with walkdir and aggregation

pub mod count;
pub mod scan;
