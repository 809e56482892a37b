//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{parse_list, Overrides, Settings};
use crate::core::render::{OutputFormat, RenderConfig};

/// codecost - estimate project size and development cost from source code.
#[derive(Parser, Debug)]
#[command(name = "codecost")]
#[command(
    author,
    version,
    about,
    long_about = r#"codecost walks a source tree, counts code lines per file after stripping
comments, and converts the total into calendar months and cost.

Output formats:
- jsonl: one JSON object per line, tagged with "kind" (best for piping)
- json: a single JSON document
- md: human-friendly Markdown tables
- summary: colored plain text for the terminal

Settings are read from ROOT/codecost.toml when present, then from
CODECOST_* environment variables, then from flags.

Examples:
    codecost scan
    codecost scan --exclude node_modules,target --top 20
    codecost estimate --lines 42000 --team-size 4
    codecost --format md report --salary 9500
"#
)]
pub struct Cli {
    /// Root directory to scan.
    #[arg(
        long,
        global = true,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory to scan (defaults to the current directory).\n\n\
All paths emitted in results are relative to this root. The implicit\n\
codecost.toml is looked up here."
    )]
    pub root: PathBuf,

    /// Output format (jsonl/json/md/summary).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- summary\n\n\
Tip: Prefer jsonl when you want stable, line-oriented output for piping."
    )]
    pub format: String,

    /// Explicit configuration file.
    #[arg(
        long,
        global = true,
        value_name = "PATH",
        long_help = "Read settings from this TOML file instead of ROOT/codecost.toml.\n\n\
Unlike the implicit file, an explicit file must exist."
    )]
    pub config: Option<PathBuf>,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. This is useful when piping to files or when your\n\
terminal does not support ANSI colors. Only the summary format uses color."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        long_help = "Only log errors to stderr. Results are still printed to stdout.\n\n\
RUST_LOG, when set, takes precedence."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Log debug diagnostics to stderr, including every skipped binary or\n\
unreadable file. RUST_LOG, when set, takes precedence."
    )]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on md/summary formats."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count code lines under ROOT.
    #[command(
        long_about = "Walk ROOT, count every file with a recognized extension and emit one\n\
record per file followed by the aggregate totals. Records are sorted by path.\n\n\
Binary and unreadable files are skipped. Symlinked files are counted;\n\
symlinked directories are not entered.\n\n\
Examples:\n\
  codecost scan\n\
  codecost scan --exclude node_modules,dist\n\
  codecost scan --no-default-excludes\n\
  codecost --format md scan --top 10\n"
    )]
    Scan {
        #[command(flatten)]
        exclude: ExcludeArgs,

        /// Only list the N largest files.
        #[arg(
            long,
            value_name = "N",
            long_help = "Only list the N files with the most code lines.\n\n\
Totals still cover every counted file."
        )]
        top: Option<usize>,
    },

    /// Estimate schedule and cost for a given code size.
    #[command(
        long_about = "Estimate calendar months and total cost for a known number of code\n\
lines, without scanning anything.\n\n\
Examples:\n\
  codecost estimate --lines 12000\n\
  codecost estimate --lines 12000 --team-size 6 --salary 7000\n"
    )]
    Estimate {
        /// Total code lines.
        #[arg(long, value_name = "N")]
        lines: usize,

        #[command(flatten)]
        estimate: EstimateArgs,
    },

    /// Scan ROOT and estimate its cost.
    #[command(
        long_about = "Scan ROOT, then estimate schedule and cost from the code-line total.\n\n\
The report lists overall totals, the estimate, code lines per extension and\n\
the largest files.\n\n\
Examples:\n\
  codecost --format summary report\n\
  codecost --format md report --team-size 5 --currency EUR\n"
    )]
    Report {
        #[command(flatten)]
        exclude: ExcludeArgs,

        #[command(flatten)]
        estimate: EstimateArgs,

        /// Number of files in the largest-files section.
        #[arg(long, value_name = "N")]
        top: Option<usize>,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct ExcludeArgs {
    /// Directory names to skip (comma-separated).
    #[arg(
        long,
        value_delimiter = ',',
        env = "CODECOST_EXCLUDE",
        value_name = "NAMES",
        long_help = "Directory base names to skip, at any depth (comma-separated).\n\n\
Matching is exact and case-sensitive. Defaults to\n\
node_modules,venv,.git,__pycache__."
    )]
    pub exclude: Vec<String>,

    /// Do not skip any directory unless --exclude names it.
    #[arg(
        long,
        long_help = "Drop the exclusion list from defaults and codecost.toml, so node_modules,\n\
.git and the like are counted too. Names given with --exclude still apply."
    )]
    pub no_default_excludes: bool,
}

#[derive(clap::Args, Debug, Default)]
pub struct EstimateArgs {
    /// Number of developers.
    #[arg(
        long,
        env = "CODECOST_TEAM_SIZE",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub team_size: Option<u32>,

    /// Monthly salary per developer.
    #[arg(long, env = "CODECOST_SALARY", value_name = "AMOUNT")]
    pub salary: Option<f64>,

    /// Currency label shown next to costs.
    #[arg(long, value_name = "CODE")]
    pub currency: Option<String>,
}

impl ExcludeArgs {
    /// `None` keeps the configured list; `Some(vec![])` excludes nothing
    fn into_override(self) -> Option<Vec<String>> {
        let list: Vec<String> = self.exclude.iter().flat_map(|s| parse_list(s)).collect();
        if !list.is_empty() {
            Some(list)
        } else if self.no_default_excludes {
            Some(Vec::new())
        } else {
            None
        }
    }
}

fn load_settings(root: &Path, config: Option<&Path>, overrides: Overrides) -> Result<Settings> {
    Settings::load(root, config, overrides).context("invalid configuration")
}

/// Run the CLI command
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().map_err(anyhow::Error::msg)?;
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or(cli.root);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Scan { exclude, top } => {
            let overrides = Overrides {
                exclude: exclude.into_override(),
                ..Default::default()
            };
            let settings = load_settings(&root, config, overrides)?;
            crate::backends::scan::run_scan(&root, &settings, top, render_config)
                .with_context(|| format!("failed to scan {}", root.display()))
        }

        Commands::Estimate { lines, estimate } => {
            let overrides = Overrides {
                team_size: estimate.team_size,
                monthly_salary: estimate.salary,
                currency: estimate.currency,
                ..Default::default()
            };
            let settings = load_settings(&root, config, overrides)?;
            crate::flows::estimate::run_estimate(lines, &settings, render_config)
        }

        Commands::Report {
            exclude,
            estimate,
            top,
        } => {
            let overrides = Overrides {
                exclude: exclude.into_override(),
                top,
                team_size: estimate.team_size,
                monthly_salary: estimate.salary,
                currency: estimate.currency,
            };
            let settings = load_settings(&root, config, overrides)?;
            crate::flows::report::run_report(&root, &settings, render_config)
                .with_context(|| format!("failed to scan {}", root.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan_exclude_list() {
        let cli = Cli::try_parse_from(["codecost", "scan", "--exclude", "a,b, ,c"]).unwrap();
        match cli.command {
            Commands::Scan { exclude, top } => {
                assert_eq!(exclude.into_override(), Some(vec!["a".into(), "b".into(), "c".into()]));
                assert!(top.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_no_default_excludes() {
        let cli = Cli::try_parse_from(["codecost", "scan", "--no-default-excludes"]).unwrap();
        match cli.command {
            Commands::Scan { exclude, .. } => assert_eq!(exclude.into_override(), Some(Vec::new())),
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from([
            "codecost", "report", "--no-default-excludes", "--exclude", "dist",
        ])
        .unwrap();
        match cli.command {
            Commands::Report { exclude, .. } => {
                assert_eq!(exclude.into_override(), Some(vec!["dist".to_string()]))
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_empty_exclude_flag_keeps_configured_list() {
        let args = ExcludeArgs {
            exclude: vec![" ".to_string()],
            no_default_excludes: false,
        };
        assert_eq!(args.into_override(), None);
    }

    #[test]
    fn test_parse_rejects_zero_team_size() {
        let result = Cli::try_parse_from(["codecost", "estimate", "--lines", "10", "--team-size", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "codecost", "report", "--format", "md", "--pretty", "--top", "3",
        ])
        .unwrap();
        assert_eq!(cli.format, "md");
        assert!(cli.pretty);
        assert!(matches!(cli.command, Commands::Report { top: Some(3), .. }));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["codecost", "-q", "-v", "scan"]).is_err());
    }
}
