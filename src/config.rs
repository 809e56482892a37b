//! Settings resolution
//!
//! Layers, lowest precedence first: built-in defaults, an optional
//! `codecost.toml`, then environment variables and command-line flags
//! (both handled by clap and applied through [`Overrides`]).

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::backends::scan::default_excluded_dirs;
use crate::core::error::ConfigError;
use crate::flows::estimate::EstimateParams;

/// Config file looked up in the scan root when no explicit path is given
pub const CONFIG_FILE_NAME: &str = "codecost.toml";

/// Default number of files shown in condensed views
pub const DEFAULT_TOP: usize = 10;

/// On-disk configuration; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub exclude: Option<Vec<String>>,
    pub top: Option<usize>,
    #[serde(default)]
    pub estimate: EstimateSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EstimateSection {
    pub team_size: Option<u32>,
    pub monthly_salary: Option<f64>,
    pub currency: Option<String>,
}

impl FileConfig {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub exclude: Option<Vec<String>>,
    pub top: Option<usize>,
    pub team_size: Option<u32>,
    pub monthly_salary: Option<f64>,
    pub currency: Option<String>,
}

/// Fully resolved settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory base names pruned during the scan
    pub exclude: Vec<String>,
    pub estimate: EstimateParams,
    /// Display-only currency label
    pub currency: Option<String>,
    pub top: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exclude: default_excluded_dirs(),
            estimate: EstimateParams::default(),
            currency: None,
            top: DEFAULT_TOP,
        }
    }
}

impl Settings {
    /// Resolve settings for a scan root.
    ///
    /// An explicit `config_path` must exist; the implicit `codecost.toml`
    /// in `root` is optional.
    pub fn load(
        root: &Path,
        config_path: Option<&Path>,
        overrides: Overrides,
    ) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) => Some(FileConfig::read(path)?),
            None => {
                let implicit: PathBuf = root.join(CONFIG_FILE_NAME);
                if implicit.is_file() {
                    debug!(path = %implicit.display(), "loading config file");
                    Some(FileConfig::read(&implicit)?)
                } else {
                    None
                }
            }
        };

        Self::resolve(file.unwrap_or_default(), overrides)
    }

    /// Merge defaults, file values and overrides, then validate
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        // An explicit empty list excludes nothing
        let exclude = overrides
            .exclude
            .or(file.exclude)
            .unwrap_or(defaults.exclude);

        let team_size = overrides
            .team_size
            .or(file.estimate.team_size)
            .unwrap_or(defaults.estimate.team_size);
        let monthly_salary = overrides
            .monthly_salary
            .or(file.estimate.monthly_salary)
            .unwrap_or(defaults.estimate.monthly_salary);

        Ok(Self {
            exclude,
            estimate: EstimateParams::new(team_size, monthly_salary)?,
            currency: overrides.currency.or(file.estimate.currency),
            top: overrides.top.or(file.top).unwrap_or(defaults.top),
        })
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
