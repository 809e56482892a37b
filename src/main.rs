//! codecost - estimate project size and development cost from source code
//!
//! codecost provides:
//! - Code line counting with per-language comment stripping
//! - Directory scanning with excluded directory names
//! - Effort and cost estimation from the code-line total
//! - Unified output format (jsonl/json/md/summary)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use codecost::cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // RUST_LOG wins over -v/-q
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    cli::run(cli)
}
