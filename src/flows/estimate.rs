//! Effort and cost estimation
//!
//! Converts a code-line total into calendar months and total cost using
//! tiered developer productivity and a team-size efficiency factor.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::core::error::ConfigError;
use crate::core::model::EstimateResult;
use crate::core::render::{RenderConfig, Renderer};
use crate::flows::report::EstimateSummary;

/// Working days per month
pub const WORK_DAYS_PER_MONTH: f64 = 21.0;

/// Share of a working day spent producing code
pub const PRODUCTIVE_TIME_FRACTION: f64 = 0.7;

/// Default team size used when none is configured
pub const DEFAULT_TEAM_SIZE: u32 = 3;

/// Default monthly salary per developer
pub const DEFAULT_MONTHLY_SALARY: f64 = 8000.0;

/// Productivity bracket selected by total project size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductivityTier {
    /// Fewer than 5,000 code lines
    Small,
    /// 5,000 up to (not including) 50,000 code lines
    Medium,
    /// 50,000 code lines or more
    Large,
}

impl ProductivityTier {
    pub fn for_lines(total_code_lines: usize) -> Self {
        if total_code_lines < 5_000 {
            ProductivityTier::Small
        } else if total_code_lines < 50_000 {
            ProductivityTier::Medium
        } else {
            ProductivityTier::Large
        }
    }

    /// Code lines per developer per day
    pub fn lines_per_day(&self) -> f64 {
        match self {
            ProductivityTier::Small => 150.0,
            ProductivityTier::Medium => 100.0,
            ProductivityTier::Large => 80.0,
        }
    }

    /// Code lines per developer per month
    pub fn monthly_capacity(&self) -> f64 {
        self.lines_per_day() * WORK_DAYS_PER_MONTH * PRODUCTIVE_TIME_FRACTION
    }
}

/// Coordination overhead factor. Smaller means more calendar time.
pub fn team_efficiency(team_size: u32) -> f64 {
    if team_size <= 2 {
        1.0
    } else if team_size <= 5 {
        0.9
    } else {
        0.8
    }
}

/// Total effort in person-months
pub fn person_months(total_code_lines: usize) -> f64 {
    total_code_lines as f64 / ProductivityTier::for_lines(total_code_lines).monthly_capacity()
}

/// Estimate calendar months and total cost.
///
/// Inputs are not validated: a team size of 0 produces a non-finite result.
/// Use [`EstimateParams`] to validate user-supplied values first.
pub fn estimate(total_code_lines: usize, team_size: u32, monthly_salary: f64) -> EstimateResult {
    let team = f64::from(team_size);
    let calendar_months = person_months(total_code_lines) / team / team_efficiency(team_size);
    EstimateResult {
        calendar_months,
        total_cost: team * calendar_months * monthly_salary,
    }
}

/// Validated estimator inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateParams {
    pub team_size: u32,
    pub monthly_salary: f64,
}

impl Default for EstimateParams {
    fn default() -> Self {
        Self {
            team_size: DEFAULT_TEAM_SIZE,
            monthly_salary: DEFAULT_MONTHLY_SALARY,
        }
    }
}

impl EstimateParams {
    pub fn new(team_size: u32, monthly_salary: f64) -> Result<Self, ConfigError> {
        if team_size < 1 {
            return Err(ConfigError::TeamSize(team_size));
        }
        if !(monthly_salary.is_finite() && monthly_salary > 0.0) {
            return Err(ConfigError::Salary(monthly_salary));
        }
        Ok(Self {
            team_size,
            monthly_salary,
        })
    }

    pub fn estimate(&self, total_code_lines: usize) -> EstimateResult {
        estimate(total_code_lines, self.team_size, self.monthly_salary)
    }
}

/// Run the estimate command for a known code-line total
pub fn run_estimate(total_code_lines: usize, settings: &Settings, config: RenderConfig) -> Result<()> {
    let summary = EstimateSummary::new(
        total_code_lines,
        settings.estimate,
        settings.currency.clone(),
    );
    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render_estimate(total_code_lines, &summary));
    Ok(())
}
