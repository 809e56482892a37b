//! codecost - estimate project size and development cost from source code
//!
//! Walks a source tree, counts code lines per file after stripping
//! comments, and turns the total into calendar months and cost.

pub mod backends;
pub mod cli;
pub mod config;
pub mod core;
pub mod flows;

pub use backends::count::count_lines;
pub use backends::scan::{scan, try_scan, DEFAULT_EXCLUDED_DIRS};
pub use core::languages::language_for;
pub use core::model::{AggregateStats, EstimateResult, FileRecord, LineCounts};
pub use flows::estimate::estimate;
