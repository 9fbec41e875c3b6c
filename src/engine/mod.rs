//! Pure progress computation over dated measurements.
//!
//! Everything in this module is side-effect free. Callers hand in an entry
//! snapshot together with a goal and a caller-chosen "today" and get plain
//! data back; nothing here reads the clock or any storage.

pub mod milestones;
pub mod progress;
pub mod streak;

pub use milestones::{Driver, MilestoneDef, catalog_for};
pub use progress::{evaluate, percent_of_goal, today_value, week_grid};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caller configuration problems. Data-quality problems (bad dates, negative
/// values) are never errors; those entries are skipped and counted instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("daily target must be greater than zero (got {0})")]
    NonPositiveTarget(f64),
    #[error("evaluation window must cover at least one day")]
    EmptyWindow,
}

/// The daily threshold that counts a day as successful, plus an optional
/// trailing window (7 or 30 days) for perfect-run milestones.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalConfig {
    pub daily_target: f64,
    pub evaluation_window: Option<u32>,
}

impl GoalConfig {
    pub fn new(daily_target: f64) -> Self {
        Self {
            daily_target,
            evaluation_window: None,
        }
    }

    pub fn with_window(daily_target: f64, window: u32) -> Self {
        Self {
            daily_target,
            evaluation_window: Some(window),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.daily_target > 0.0) {
            return Err(ConfigError::NonPositiveTarget(self.daily_target));
        }
        if self.evaluation_window == Some(0) {
            return Err(ConfigError::EmptyWindow);
        }
        Ok(())
    }
}
