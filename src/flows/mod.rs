//! Flows module - Operations built on top of a scan
//!
//! Provides:
//! - estimate: Effort and cost estimation from a code-line total
//! - report: Scan plus estimate, ordered for presentation

pub mod estimate;
pub mod report;
