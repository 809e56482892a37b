//! Data model
//!
//! Everything the scanner and estimator produce. All values are plain data,
//! built once per run and never mutated after the pass that created them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Line counts for a single file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    pub total: usize,
    pub empty: usize,
    pub code: usize,
}

impl LineCounts {
    /// The all-zero sentinel for binary or unreadable files
    pub const EXCLUDED: LineCounts = LineCounts {
        total: 0,
        empty: 0,
        code: 0,
    };

    pub fn new(total: usize, empty: usize, code: usize) -> Self {
        Self { total, empty, code }
    }

    /// A file with zero total lines is dropped from scan results
    pub fn is_excluded(&self) -> bool {
        self.total == 0
    }

    pub fn as_tuple(&self) -> (usize, usize, usize) {
        (self.total, self.empty, self.code)
    }
}

/// One counted file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the scan root, using '/' as separator
    pub path: String,
    pub language: String,
    /// Extension as it appears on disk, including the leading dot
    pub extension: String,
    pub total_lines: usize,
    pub empty_lines: usize,
    pub code_lines: usize,
}

impl FileRecord {
    pub fn new(
        path: impl Into<String>,
        language: impl Into<String>,
        extension: impl Into<String>,
        counts: LineCounts,
    ) -> Self {
        Self {
            path: path.into(),
            language: language.into(),
            extension: extension.into(),
            total_lines: counts.total,
            empty_lines: counts.empty,
            code_lines: counts.code,
        }
    }
}

/// Totals across all counted files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_lines: usize,
    pub total_empty_lines: usize,
    pub total_code_lines: usize,
    pub total_files: usize,
    /// Code lines summed per lowercased extension (with leading dot)
    pub lines_by_extension: BTreeMap<String, usize>,
}

impl AggregateStats {
    /// Fold one record into the totals
    pub fn add(&mut self, record: &FileRecord) {
        self.total_lines += record.total_lines;
        self.total_empty_lines += record.empty_lines;
        self.total_code_lines += record.code_lines;
        self.total_files += 1;
        *self
            .lines_by_extension
            .entry(record.extension.to_lowercase())
            .or_insert(0) += record.code_lines;
    }

    /// Recompute totals from scratch over a set of records
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a FileRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.add(record);
        }
        stats
    }

    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }
}

/// Output of a directory scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub records: Vec<FileRecord>,
    pub stats: AggregateStats,
}

impl ScanReport {
    pub fn push(&mut self, record: FileRecord) {
        self.stats.add(&record);
        self.records.push(record);
    }

    pub fn into_parts(self) -> (Vec<FileRecord>, AggregateStats) {
        (self.records, self.stats)
    }
}

/// Calendar time and cost for a given code size and team
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub calendar_months: f64,
    pub total_cost: f64,
}

impl EstimateResult {
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.calendar_months, self.total_cost)
    }
}
