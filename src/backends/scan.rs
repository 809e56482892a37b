//! Directory scanning backend
//!
//! Walks a source tree with walkdir, prunes excluded directory names and
//! counts every file whose extension is in the language table.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::backends::count::LineCounter;
use crate::config::Settings;
use crate::core::error::ScanError;
use crate::core::languages::{is_code_extension, language_for};
use crate::core::model::{AggregateStats, FileRecord, ScanReport};
use crate::core::paths::{dotted_extension, make_relative};
use crate::core::render::{RenderConfig, Renderer};

/// Directory names skipped when the caller does not supply any
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", "venv", ".git", "__pycache__"];

/// Default exclusions as owned strings
pub fn default_excluded_dirs() -> Vec<String> {
    DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect()
}

/// Exact, case-sensitive match of a directory's base name. The root itself
/// is never pruned.
fn is_excluded_dir(entry: &DirEntry, excluded: &[String]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    excluded.iter().any(|ex| ex.as_str() == name)
}

/// Regular files, plus symlinks whose target is a regular file. Links to
/// directories are never descended into.
fn is_countable_file(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    entry.path_is_symlink()
        && fs::metadata(entry.path())
            .map(|meta| meta.is_file())
            .unwrap_or(false)
}

/// Scan a tree, aborting on the first traversal error.
///
/// Records come back in traversal order. Symbolic links are not followed.
pub fn try_scan(root: &Path, excluded: &[String]) -> Result<ScanReport, ScanError> {
    try_scan_with(root, excluded, &LineCounter::default())
}

/// [`try_scan`] with an explicit line counter
pub fn try_scan_with(
    root: &Path,
    excluded: &[String],
    counter: &LineCounter<'_>,
) -> Result<ScanReport, ScanError> {
    if !root.exists() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(e, excluded));

    let mut report = ScanReport::default();

    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;

        if !is_countable_file(&entry) {
            continue;
        }

        let path = entry.path();
        let ext = match dotted_extension(path) {
            Some(ext) if is_code_extension(&ext) => ext,
            _ => continue,
        };

        let (counts, status) = counter.count_file(path);
        if counts.is_excluded() {
            debug!(path = %path.display(), status = status.as_str(), "skipping file");
            continue;
        }

        let relative = match make_relative(path, root) {
            Some(r) => r,
            None => continue,
        };

        report.push(FileRecord::new(relative, language_for(&ext), ext, counts));
    }

    info!(
        root = %root.display(),
        files = report.stats.total_files,
        code_lines = report.stats.total_code_lines,
        "scan complete"
    );

    Ok(report)
}

/// Scan a tree. Any traversal error yields no records and zeroed stats.
pub fn scan(root: &Path, excluded: &[String]) -> (Vec<FileRecord>, AggregateStats) {
    match try_scan(root, excluded) {
        Ok(report) => report.into_parts(),
        Err(e) => {
            warn!(error = %e, "scan aborted");
            (Vec::new(), AggregateStats::default())
        }
    }
}

/// Run the scan command.
///
/// Records are printed sorted by path. With `top`, only the `top` largest
/// files are listed; the totals still cover every file.
pub fn run_scan(
    root: &Path,
    settings: &Settings,
    top: Option<usize>,
    config: RenderConfig,
) -> Result<()> {
    let (mut records, stats) = try_scan(root, &settings.exclude)?.into_parts();

    match top {
        Some(n) => {
            crate::flows::report::sort_records(&mut records);
            records.truncate(n);
        }
        None => records.sort_by(|a, b| a.path.cmp(&b.path)),
    }

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render_scan(&records, &stats));
    Ok(())
}
