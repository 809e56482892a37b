//! Typed errors for the library layer

use std::path::PathBuf;
use thiserror::Error;

/// A directory walk that could not complete
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root does not exist: {}", .0.display())]
    MissingRoot(PathBuf),

    #[error("scan root is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to traverse {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Invalid configuration or estimator input
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("team size must be at least 1 (got {0})")]
    TeamSize(u32),

    #[error("monthly salary must be a positive number (got {0})")]
    Salary(f64),

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
