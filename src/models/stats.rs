use serde::{Deserialize, Serialize};

use crate::models::MilestoneStatus;

/// Effective value for one calendar day after same-day duplicates collapse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: String,
    pub value: f64,
    pub goal_met: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

/// Everything derived from one metric's entry history and goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub today_value: f64,
    /// Unclamped; above 100 when the goal is exceeded.
    pub percent_of_goal: f64,
    pub streak: Streak,
    /// Days across all history whose effective value met the goal.
    pub perfect_days: u32,
    pub milestones: Vec<MilestoneStatus>,
    pub total_reward_points: u32,
    /// Entries skipped for an unparseable date or negative value.
    pub malformed_entries: u32,
}
