//! Renderer module
//!
//! Renders scans, estimates and reports to different output formats:
//! jsonl, json, md, summary

use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use crate::core::model::{AggregateStats, FileRecord};
use crate::flows::report::{EstimateSummary, ExtensionShare, Report};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Summary,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "summary" | "text" => Ok(OutputFormat::Summary),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// One line of jsonl output
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum OutputItem<'a> {
    File(&'a FileRecord),
    Extension(&'a ExtensionShare),
    Stats(&'a AggregateStats),
    Estimate(&'a EstimateSummary),
}

#[derive(Debug, Serialize)]
struct ScanDocument<'a> {
    records: &'a [FileRecord],
    stats: &'a AggregateStats,
}

/// Format an integer with `,` thousands separators
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a money amount with two decimals and thousands separators
pub fn format_money(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

fn format_percent(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

fn cost_label(estimate: &EstimateSummary) -> String {
    match &estimate.currency {
        Some(currency) => format!("{} {}", format_money(estimate.total_cost), currency),
        None => format_money(estimate.total_cost),
    }
}

/// Renderer for scan and estimate output
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(&self, report: &Report, mut writer: W) -> std::io::Result<()> {
        let output = self.render_report(report);
        writer.write_all(output.as_bytes())
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> String {
        let rendered = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| "{}".to_string())
    }

    fn render_jsonl(&self, items: &[OutputItem<'_>]) -> String {
        items
            .iter()
            .map(|item| self.to_json(item))
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render per-file records followed by the aggregate totals
    pub fn render_scan(&self, records: &[FileRecord], stats: &AggregateStats) -> String {
        match self.config.format {
            OutputFormat::Jsonl => {
                let mut items: Vec<OutputItem<'_>> =
                    records.iter().map(OutputItem::File).collect();
                items.push(OutputItem::Stats(stats));
                self.render_jsonl(&items)
            }
            OutputFormat::Json => self.to_json(&ScanDocument { records, stats }),
            OutputFormat::Markdown => {
                let mut output = String::new();
                push_overview_md(&mut output, stats);
                push_files_md(&mut output, "Files", records);
                output
            }
            OutputFormat::Summary => {
                let mut output = String::new();
                push_overview_summary(&mut output, stats);
                push_files_summary(&mut output, "Files", records);
                output
            }
        }
    }

    /// Render a standalone estimate
    pub fn render_estimate(&self, total_code_lines: usize, estimate: &EstimateSummary) -> String {
        match self.config.format {
            OutputFormat::Jsonl | OutputFormat::Json => self.to_json(&OutputItem::Estimate(estimate)),
            OutputFormat::Markdown => {
                let mut output = String::new();
                push_estimate_md(&mut output, total_code_lines, estimate);
                output
            }
            OutputFormat::Summary => {
                let mut output = String::new();
                push_estimate_summary(&mut output, total_code_lines, estimate);
                output
            }
        }
    }

    /// Render a full report
    pub fn render_report(&self, report: &Report) -> String {
        match self.config.format {
            OutputFormat::Jsonl => {
                let mut items: Vec<OutputItem<'_>> = Vec::new();
                items.push(OutputItem::Stats(&report.stats));
                items.push(OutputItem::Estimate(&report.estimate));
                items.extend(report.extensions.iter().map(OutputItem::Extension));
                items.extend(report.records.iter().map(OutputItem::File));
                self.render_jsonl(&items)
            }
            OutputFormat::Json => self.to_json(report),
            OutputFormat::Markdown => self.render_report_md(report),
            OutputFormat::Summary => self.render_report_summary(report),
        }
    }

    fn render_report_md(&self, report: &Report) -> String {
        let mut output = String::new();
        output.push_str(&format!("# Project Report: `{}`\n\n", report.root));
        push_overview_md(&mut output, &report.stats);
        push_estimate_md(&mut output, report.stats.total_code_lines, &report.estimate);

        if !report.extensions.is_empty() {
            output.push_str("## Code Lines by Extension\n\n");
            output.push_str("| Extension | Language | Code Lines | Share |\n");
            output.push_str("|-----------|----------|-----------:|------:|\n");
            for ext in &report.extensions {
                output.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    ext.extension,
                    ext.language,
                    ext.code_lines,
                    format_percent(ext.share)
                ));
            }
            output.push('\n');
        }

        push_files_md(
            &mut output,
            &format!("Top {} Files by Code Lines", report.top_files().len()),
            report.top_files(),
        );
        push_files_md(&mut output, "All Files", &report.records);
        output
    }

    fn render_report_summary(&self, report: &Report) -> String {
        let mut output = String::new();
        output.push_str(&format!("{} {}\n\n", "Project:".bold(), report.root));
        push_overview_summary(&mut output, &report.stats);
        push_estimate_summary(&mut output, report.stats.total_code_lines, &report.estimate);

        if !report.extensions.is_empty() {
            output.push_str(&format!("\n{}\n", "Code lines by extension".bold()));
            for ext in &report.extensions {
                output.push_str(&format!(
                    "  {:8} {:20} {:>10}  {:>6}\n",
                    ext.extension,
                    ext.language,
                    group_thousands(ext.code_lines as u64),
                    format_percent(ext.share)
                ));
            }
        }

        push_files_summary(
            &mut output,
            &format!("Top {} files", report.top_files().len()),
            report.top_files(),
        );
        output
    }
}

fn push_overview_md(output: &mut String, stats: &AggregateStats) {
    output.push_str("## Overview\n\n");
    output.push_str("| Metric | Value |\n");
    output.push_str("|--------|------:|\n");
    output.push_str(&format!("| Files | {} |\n", stats.total_files));
    output.push_str(&format!("| Total lines | {} |\n", stats.total_lines));
    output.push_str(&format!("| Empty lines | {} |\n", stats.total_empty_lines));
    output.push_str(&format!("| Code lines | {} |\n", stats.total_code_lines));
    output.push_str(&format!(
        "| File types | {} |\n\n",
        stats.lines_by_extension.len()
    ));
}

fn push_files_md(output: &mut String, title: &str, records: &[FileRecord]) {
    if records.is_empty() {
        return;
    }
    output.push_str(&format!("## {}\n\n", title));
    output.push_str("| File | Language | Total | Empty | Code |\n");
    output.push_str("|------|----------|------:|------:|-----:|\n");
    for r in records {
        output.push_str(&format!(
            "| `{}` | {} | {} | {} | {} |\n",
            r.path, r.language, r.total_lines, r.empty_lines, r.code_lines
        ));
    }
    output.push('\n');
}

fn push_estimate_md(output: &mut String, total_code_lines: usize, estimate: &EstimateSummary) {
    output.push_str("## Estimate\n\n");
    output.push_str("| Metric | Value |\n");
    output.push_str("|--------|------:|\n");
    output.push_str(&format!("| Code lines | {} |\n", total_code_lines));
    output.push_str(&format!("| Team size | {} |\n", estimate.team_size));
    output.push_str(&format!(
        "| Monthly salary | {} |\n",
        format_money(estimate.monthly_salary)
    ));
    output.push_str(&format!("| Person-months | {:.1} |\n", estimate.person_months));
    output.push_str(&format!(
        "| Calendar months | {:.1} |\n",
        estimate.calendar_months
    ));
    output.push_str(&format!("| Total cost | {} |\n\n", cost_label(estimate)));
}

fn push_overview_summary(output: &mut String, stats: &AggregateStats) {
    output.push_str(&format!("{}\n", "Overview".bold()));
    output.push_str("─────────────────────────────────────\n");
    output.push_str(&format!("  Files:        {}\n", stats.total_files));
    output.push_str(&format!(
        "  Total lines:  {}\n",
        group_thousands(stats.total_lines as u64)
    ));
    output.push_str(&format!(
        "  Empty lines:  {}\n",
        group_thousands(stats.total_empty_lines as u64)
    ));
    output.push_str(&format!(
        "  Code lines:   {}\n",
        group_thousands(stats.total_code_lines as u64).as_str().cyan()
    ));
    output.push_str(&format!(
        "  File types:   {}\n",
        stats.lines_by_extension.len()
    ));
}

fn push_files_summary(output: &mut String, title: &str, records: &[FileRecord]) {
    if records.is_empty() {
        return;
    }
    output.push_str(&format!("\n{}\n", title.bold()));
    for r in records {
        output.push_str(&format!(
            "  {:40} {:18} {:>8} total {:>8} code\n",
            r.path, r.language, r.total_lines, r.code_lines
        ));
    }
}

fn push_estimate_summary(output: &mut String, total_code_lines: usize, estimate: &EstimateSummary) {
    output.push_str(&format!("\n{}\n", "Estimate".bold()));
    output.push_str("─────────────────────────────────────\n");
    output.push_str(&format!(
        "  Code lines:       {}\n",
        group_thousands(total_code_lines as u64)
    ));
    output.push_str(&format!("  Team size:        {}\n", estimate.team_size));
    output.push_str(&format!(
        "  Monthly salary:   {}\n",
        format_money(estimate.monthly_salary)
    ));
    output.push_str(&format!(
        "  Person-months:    {:.1}\n",
        estimate.person_months
    ));
    output.push_str(&format!(
        "  Calendar months:  {}\n",
        format!("{:.1}", estimate.calendar_months).as_str().green()
    ));
    output.push_str(&format!(
        "  Total cost:       {}\n",
        cost_label(estimate).as_str().green()
    ));
}
