//! Golden tests for codecost
//!
//! These tests run the binary against the checked-in sample project and
//! pin the exact counts it must produce.

use assert_cmd::Command;
use serde_json::Value;
use std::path::PathBuf;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get the path to the sample project
fn sample_project() -> PathBuf {
    fixtures_dir().join("sample_project")
}

/// Create a command for running the codecost binary
fn codecost_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("codecost"));
    cmd.env_remove("CODECOST_EXCLUDE")
        .env_remove("CODECOST_TEAM_SIZE")
        .env_remove("CODECOST_SALARY")
        .env_remove("RUST_LOG");
    cmd
}

/// Parse JSONL output into a vector of JSON values
fn parse_jsonl(output: &str) -> Vec<Value> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str::<Value>(l).ok())
        .collect()
}

fn items_of_kind<'a>(items: &'a [Value], kind: &str) -> Vec<&'a Value> {
    items.iter().filter(|v| v["kind"] == kind).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Scan Tests ====================

    #[test]
    fn golden_scan_records() {
        let output = codecost_cmd()
            .arg("--root")
            .arg(sample_project())
            .arg("scan")
            .output()
            .expect("failed to execute");
        assert!(output.status.success());

        let items = parse_jsonl(&String::from_utf8_lossy(&output.stdout));
        let files = items_of_kind(&items, "file");

        let rows: Vec<(&str, &str, u64, u64, u64)> = files
            .iter()
            .map(|v| {
                (
                    v["path"].as_str().unwrap(),
                    v["language"].as_str().unwrap(),
                    v["total_lines"].as_u64().unwrap(),
                    v["empty_lines"].as_u64().unwrap(),
                    v["code_lines"].as_u64().unwrap(),
                )
            })
            .collect();

        assert_eq!(
            rows,
            vec![
                ("scripts/tool.py", "Python", 12, 4, 3),
                ("src/empty.rs", "Rust", 1, 1, 0),
                ("src/main.rs", "Rust", 13, 3, 6),
                ("web/index.html", "HTML", 9, 1, 6),
            ]
        );
    }

    #[test]
    fn golden_scan_stats() {
        let output = codecost_cmd()
            .arg("--root")
            .arg(sample_project())
            .arg("scan")
            .output()
            .expect("failed to execute");

        let items = parse_jsonl(&String::from_utf8_lossy(&output.stdout));
        let stats = items.last().expect("stats line");

        assert_eq!(stats["kind"], "stats");
        assert_eq!(stats["total_files"], 4);
        assert_eq!(stats["total_lines"], 35);
        assert_eq!(stats["total_empty_lines"], 9);
        assert_eq!(stats["total_code_lines"], 15);

        let by_ext = stats["lines_by_extension"].as_object().unwrap();
        let keys: Vec<&str> = by_ext.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec![".html", ".py", ".rs"]);
        assert_eq!(by_ext[".rs"], 6);
        assert_eq!(by_ext[".py"], 3);
        assert_eq!(by_ext[".html"], 6);
    }

    #[test]
    fn golden_scan_excluding_web() {
        let output = codecost_cmd()
            .arg("--root")
            .arg(sample_project())
            .arg("scan")
            .arg("--exclude")
            .arg("web")
            .output()
            .expect("failed to execute");

        let items = parse_jsonl(&String::from_utf8_lossy(&output.stdout));
        assert_eq!(items_of_kind(&items, "file").len(), 3);
        let stats = items.last().unwrap();
        assert_eq!(stats["total_code_lines"], 9);
        assert!(stats["lines_by_extension"].get(".html").is_none());
    }

    // ==================== Report Tests ====================

    #[test]
    fn golden_report_json() {
        let output = codecost_cmd()
            .arg("--root")
            .arg(sample_project())
            .arg("--format")
            .arg("json")
            .arg("report")
            .arg("--team-size")
            .arg("1")
            .arg("--salary")
            .arg("2205")
            .output()
            .expect("failed to execute");
        assert!(output.status.success());

        let report: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["stats"]["total_code_lines"], 15);
        assert_eq!(report["estimate"]["tier"], "small");

        // 15 lines at 2205 lines/month, one developer at 2205/month
        let months = report["estimate"]["calendar_months"].as_f64().unwrap();
        let cost = report["estimate"]["total_cost"].as_f64().unwrap();
        assert!((months - 15.0 / 2205.0).abs() < 1e-9);
        assert!((cost - 15.0).abs() < 1e-9);

        let records = report["records"].as_array().unwrap();
        assert_eq!(records[0]["path"], "src/main.rs");
        assert_eq!(records[1]["path"], "web/index.html");

        let extensions = report["extensions"].as_array().unwrap();
        assert_eq!(extensions[0]["extension"], ".html");
        assert_eq!(extensions[1]["extension"], ".rs");
        assert_eq!(extensions[2]["extension"], ".py");
    }

    #[test]
    fn golden_report_markdown_sections() {
        let output = codecost_cmd()
            .arg("--root")
            .arg(sample_project())
            .arg("--format")
            .arg("md")
            .arg("report")
            .arg("--top")
            .arg("2")
            .output()
            .expect("failed to execute");
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(stdout.contains("## Overview"));
        assert!(stdout.contains("| Files | 4 |"));
        assert!(stdout.contains("| Code lines | 15 |"));
        assert!(stdout.contains("## Estimate"));
        assert!(stdout.contains("| .py | Python | 3 | 20.0% |"));
        assert!(stdout.contains("## Top 2 Files by Code Lines"));
    }
}
