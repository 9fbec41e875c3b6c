use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use crate::engine::milestones::{self, Measures, MilestoneDef};
use crate::engine::{ConfigError, GoalConfig, streak};
use crate::models::{DailyStats, Entry, ProgressSummary, Streak};

/// Parse an entry date. Plain calendar days and full RFC 3339 instants are
/// accepted; anything else marks the entry malformed.
fn parse_day(raw: &str) -> Option<NaiveDate> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(day);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|instant| instant.date_naive())
}

/// Entry history collapsed to one effective value per calendar day.
struct DayLedger {
    /// Latest value per day, last write wins in collection order.
    days: BTreeMap<NaiveDate, f64>,
    /// Well-formed entries with a value above zero.
    logged: u32,
    /// Entries skipped for an unparseable date or negative value.
    malformed: u32,
}

fn collapse(entries: &[Entry]) -> DayLedger {
    let mut ledger = DayLedger {
        days: BTreeMap::new(),
        logged: 0,
        malformed: 0,
    };

    for entry in entries {
        let day = match parse_day(&entry.date) {
            Some(day) if entry.value >= 0.0 => day,
            _ => {
                ledger.malformed += 1;
                continue;
            }
        };
        if entry.value > 0.0 {
            ledger.logged += 1;
        }
        ledger.days.insert(day, entry.value);
    }

    ledger
}

fn successful_days(days: &BTreeMap<NaiveDate, f64>, target: f64) -> BTreeSet<NaiveDate> {
    days.iter()
        .filter(|&(_, &value)| value >= target)
        .map(|(&day, _)| day)
        .collect()
}

/// The most recent entry for `today`, or 0 when nothing was logged yet.
pub fn today_value(entries: &[Entry], today: NaiveDate) -> f64 {
    collapse(entries).days.get(&today).copied().unwrap_or(0.0)
}

/// Raw percent of goal, unclamped; display layers decide how to cap it.
pub fn percent_of_goal(value: f64, daily_target: f64) -> Result<f64, ConfigError> {
    if !(daily_target > 0.0) {
        return Err(ConfigError::NonPositiveTarget(daily_target));
    }
    Ok(value / daily_target * 100.0)
}

/// Derive the full progress picture for one metric: today's value, percent
/// of goal, streaks, and the evaluated milestone catalog. Recomputed from
/// scratch on every call; identical input always yields identical output.
pub fn evaluate(
    entries: &[Entry],
    goal: &GoalConfig,
    today: NaiveDate,
    catalog: &[MilestoneDef],
) -> Result<ProgressSummary, ConfigError> {
    goal.validate()?;

    let ledger = collapse(entries);
    let today_value = ledger.days.get(&today).copied().unwrap_or(0.0);
    let percent = today_value / goal.daily_target * 100.0;

    let successes = successful_days(&ledger.days, goal.daily_target);
    let streak = Streak {
        current: streak::current(&successes, today),
        best: streak::best(&successes),
    };
    let window_days = goal
        .evaluation_window
        .map(|window| streak::trailing_window(&successes, today, window))
        .unwrap_or(0);

    let measures = Measures {
        today_value,
        best_streak: streak.best,
        entries_logged: ledger.logged,
        window_days,
    };
    let (statuses, total_reward_points) = milestones::evaluate(catalog, &measures);

    Ok(ProgressSummary {
        today_value,
        percent_of_goal: percent,
        streak,
        perfect_days: successes.len() as u32,
        milestones: statuses,
        total_reward_points,
        malformed_entries: ledger.malformed,
    })
}

/// Per-day effective values for the `days` calendar days ending at `today`,
/// oldest first. Days without an entry appear with value 0.
pub fn week_grid(
    entries: &[Entry],
    goal: &GoalConfig,
    today: NaiveDate,
    days: u32,
) -> Result<Vec<DailyStats>, ConfigError> {
    goal.validate()?;

    let ledger = collapse(entries);
    let mut grid = Vec::with_capacity(days as usize);
    for offset in (0..days).rev() {
        let Some(day) = today.checked_sub_days(chrono::Days::new(u64::from(offset))) else {
            continue;
        };
        let value = ledger.days.get(&day).copied().unwrap_or(0.0);
        grid.push(DailyStats {
            date: day.format("%Y-%m-%d").to_string(),
            value,
            goal_met: value >= goal.daily_target,
        });
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog_for;
    use crate::models::Metric;

    fn day0() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn date(day: u32) -> String {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .format("%Y-%m-%d")
            .to_string()
    }

    fn water_goal() -> GoalConfig {
        GoalConfig::with_window(2000.0, 7)
    }

    fn run(entries: &[Entry], goal: &GoalConfig) -> ProgressSummary {
        let catalog = catalog_for(Metric::Water, goal);
        evaluate(entries, goal, day0(), &catalog).unwrap()
    }

    #[test]
    fn test_goal_met_today() {
        // Scenario: one full-goal entry today.
        let entries = vec![Entry::new(date(15), 2000.0)];
        let summary = run(&entries, &water_goal());

        assert_eq!(summary.today_value, 2000.0);
        assert_eq!(summary.percent_of_goal, 100.0);
        assert_eq!(summary.streak.current, 1);
        let daily = summary
            .milestones
            .iter()
            .find(|m| m.id == "daily_goal")
            .unwrap();
        assert!(daily.achieved);
    }

    #[test]
    fn test_empty_history() {
        let summary = run(&[], &water_goal());

        assert_eq!(summary.today_value, 0.0);
        assert_eq!(summary.percent_of_goal, 0.0);
        assert_eq!(summary.streak, Streak { current: 0, best: 0 });
        assert_eq!(summary.perfect_days, 0);
        assert_eq!(summary.total_reward_points, 0);
        assert!(summary.milestones.iter().all(|m| !m.achieved));
    }

    #[test]
    fn test_seven_day_run() {
        let entries: Vec<Entry> = (9..=15).map(|d| Entry::new(date(d), 2000.0)).collect();
        let summary = run(&entries, &water_goal());

        assert_eq!(summary.streak.current, 7);
        assert_eq!(summary.streak.best, 7);
        let week = summary
            .milestones
            .iter()
            .find(|m| m.id == "streak_7")
            .unwrap();
        assert!(week.achieved);
        assert!(summary.total_reward_points >= week.reward_points);
        // The trailing window is perfect too.
        let perfect = summary
            .milestones
            .iter()
            .find(|m| m.id == "perfect_window")
            .unwrap();
        assert!(perfect.achieved);
    }

    #[test]
    fn test_half_goal_day() {
        let entries = vec![Entry::new(date(15), 1000.0)];
        let summary = run(&entries, &water_goal());

        assert_eq!(summary.percent_of_goal, 50.0);
        let by_id = |id: &str| summary.milestones.iter().find(|m| m.id == id).unwrap();
        assert!(by_id("half_goal").achieved);
        assert!(!by_id("daily_goal").achieved);
        // A half-goal day is not a successful day for streak purposes.
        assert_eq!(summary.streak.current, 0);
    }

    #[test]
    fn test_zero_target_is_configuration_error() {
        let goal = GoalConfig::new(0.0);
        let catalog = catalog_for(Metric::Water, &GoalConfig::new(2000.0));
        let err = evaluate(&[Entry::new(date(15), 500.0)], &goal, day0(), &catalog).unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveTarget(0.0));
    }

    #[test]
    fn test_percent_unclamped_above_goal() {
        let entries = vec![Entry::new(date(15), 3000.0)];
        let summary = run(&entries, &water_goal());
        assert_eq!(summary.percent_of_goal, 150.0);
        // Milestone progress stays capped.
        assert!(summary.milestones.iter().all(|m| m.progress_percent <= 100.0));
    }

    #[test]
    fn test_same_day_last_write_wins() {
        let entries = vec![
            Entry::new(date(15), 500.0),
            Entry::new(date(15), 1200.0),
            Entry::new(date(15), 900.0),
        ];
        assert_eq!(today_value(&entries, day0()), 900.0);
    }

    #[test]
    fn test_unsorted_entries() {
        let entries = vec![
            Entry::new(date(14), 2000.0),
            Entry::new(date(12), 2000.0),
            Entry::new(date(15), 2000.0),
            Entry::new(date(13), 2000.0),
        ];
        let summary = run(&entries, &water_goal());
        assert_eq!(summary.streak.current, 4);
        assert_eq!(summary.streak.best, 4);
    }

    #[test]
    fn test_malformed_entries_skipped_not_fatal() {
        let entries = vec![
            Entry::new("not-a-date", 2000.0),
            Entry::new(date(15), -3.0),
            Entry::new(date(15), 2000.0),
            Entry::new(date(14), 2000.0),
        ];
        let summary = run(&entries, &water_goal());

        assert_eq!(summary.malformed_entries, 2);
        assert_eq!(summary.today_value, 2000.0);
        assert_eq!(summary.streak.current, 2);
    }

    #[test]
    fn test_rfc3339_dates_accepted() {
        let entries = vec![Entry::new("2024-03-15T08:30:00+00:00", 2000.0)];
        let summary = run(&entries, &water_goal());
        assert_eq!(summary.today_value, 2000.0);
        assert_eq!(summary.malformed_entries, 0);
    }

    #[test]
    fn test_missing_day_breaks_streak() {
        let entries = vec![
            Entry::new(date(11), 2000.0),
            Entry::new(date(12), 2000.0),
            // the 13th is absent
            Entry::new(date(14), 2000.0),
            Entry::new(date(15), 2000.0),
        ];
        let summary = run(&entries, &water_goal());
        assert_eq!(summary.streak.current, 2);
        assert_eq!(summary.streak.best, 2);
    }

    #[test]
    fn test_below_target_day_breaks_streak_like_gap() {
        let entries = vec![
            Entry::new(date(13), 2000.0),
            Entry::new(date(14), 300.0),
            Entry::new(date(15), 2000.0),
        ];
        let summary = run(&entries, &water_goal());
        assert_eq!(summary.streak.current, 1);
    }

    #[test]
    fn test_first_entry_requires_positive_value() {
        let entries = vec![Entry::new(date(15), 0.0)];
        let summary = run(&entries, &water_goal());
        let first = summary
            .milestones
            .iter()
            .find(|m| m.id == "first_entry")
            .unwrap();
        assert!(!first.achieved);
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let entries = vec![
            Entry::new(date(13), 1800.0),
            Entry::new(date(14), 2400.0),
            Entry::new(date(15), 2000.0),
        ];
        let first = run(&entries, &water_goal());
        let second = run(&entries, &water_goal());
        assert_eq!(first, second);
    }

    #[test]
    fn test_percent_of_goal_contract() {
        assert_eq!(percent_of_goal(500.0, 2000.0).unwrap(), 25.0);
        assert_eq!(percent_of_goal(0.0, 2000.0).unwrap(), 0.0);
        assert!(percent_of_goal(500.0, 0.0).is_err());
    }

    #[test]
    fn test_week_grid_marks_missing_days() {
        let entries = vec![Entry::new(date(15), 2000.0), Entry::new(date(13), 800.0)];
        let grid = week_grid(&entries, &water_goal(), day0(), 7).unwrap();

        assert_eq!(grid.len(), 7);
        assert_eq!(grid[6].date, date(15));
        assert!(grid[6].goal_met);
        assert_eq!(grid[4].value, 800.0);
        assert!(!grid[4].goal_met);
        assert_eq!(grid[5].value, 0.0);
    }
}
