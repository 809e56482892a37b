//! Report flow - scan a project and estimate its cost
//!
//! Combines the scan result with an estimate and orders everything for
//! presentation: files by code lines, extensions by share of code.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::backends::scan::try_scan;
use crate::config::Settings;
use crate::core::languages::language_for;
use crate::core::model::{AggregateStats, EstimateResult, FileRecord, ScanReport};
use crate::core::render::{RenderConfig, Renderer};
use crate::flows::estimate::{person_months, EstimateParams, ProductivityTier};

/// Code lines contributed by one extension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtensionShare {
    pub extension: String,
    pub language: String,
    pub code_lines: usize,
    /// Fraction of all code lines, 0.0 to 1.0
    pub share: f64,
}

/// Estimate plus the intermediate values that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSummary {
    pub team_size: u32,
    pub monthly_salary: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub tier: ProductivityTier,
    pub person_months: f64,
    pub calendar_months: f64,
    pub total_cost: f64,
}

impl EstimateSummary {
    pub fn new(total_code_lines: usize, params: EstimateParams, currency: Option<String>) -> Self {
        let EstimateResult {
            calendar_months,
            total_cost,
        } = params.estimate(total_code_lines);
        Self {
            team_size: params.team_size,
            monthly_salary: params.monthly_salary,
            currency,
            tier: ProductivityTier::for_lines(total_code_lines),
            person_months: person_months(total_code_lines),
            calendar_months,
            total_cost,
        }
    }
}

/// Full project report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub root: String,
    pub generated_at: DateTime<Utc>,
    pub stats: AggregateStats,
    pub estimate: EstimateSummary,
    pub extensions: Vec<ExtensionShare>,
    /// All records, largest first
    pub records: Vec<FileRecord>,
    /// How many leading records to show in condensed views
    pub top: usize,
}

impl Report {
    pub fn top_files(&self) -> &[FileRecord] {
        &self.records[..self.top.min(self.records.len())]
    }
}

/// Sort records by code lines descending, then path for stable output
pub fn sort_records(records: &mut [FileRecord]) {
    records.sort_by(|a, b| {
        b.code_lines
            .cmp(&a.code_lines)
            .then_with(|| a.path.cmp(&b.path))
    });
}

/// Per-extension shares, largest first
pub fn extension_shares(stats: &AggregateStats) -> Vec<ExtensionShare> {
    let total = stats.total_code_lines;
    let mut shares: Vec<ExtensionShare> = stats
        .lines_by_extension
        .iter()
        .map(|(ext, &lines)| ExtensionShare {
            extension: ext.clone(),
            language: language_for(ext).to_string(),
            code_lines: lines,
            share: if total == 0 {
                0.0
            } else {
                lines as f64 / total as f64
            },
        })
        .collect();
    shares.sort_by(|a, b| {
        b.code_lines
            .cmp(&a.code_lines)
            .then_with(|| a.extension.cmp(&b.extension))
    });
    shares
}

/// Build a report from an existing scan
pub fn build_report(root: &Path, scan: ScanReport, settings: &Settings) -> Report {
    let ScanReport { mut records, stats } = scan;
    sort_records(&mut records);

    Report {
        root: root.to_string_lossy().to_string(),
        generated_at: Utc::now(),
        estimate: EstimateSummary::new(
            stats.total_code_lines,
            settings.estimate,
            settings.currency.clone(),
        ),
        extensions: extension_shares(&stats),
        stats,
        records,
        top: settings.top,
    }
}

/// Scan `root` and build a report
pub fn generate_report(root: &Path, settings: &Settings) -> Result<Report> {
    let scan = try_scan(root, &settings.exclude)?;
    Ok(build_report(root, scan, settings))
}

/// Run the report command
pub fn run_report(root: &Path, settings: &Settings, config: RenderConfig) -> Result<()> {
    let report = generate_report(root, settings)?;
    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render_report(&report));
    Ok(())
}
