use crate::engine::GoalConfig;
use crate::models::{Metric, MilestoneStatus, Rarity};

/// Which derived quantity drives a milestone toward its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    /// Lifetime count of entries with a value above zero.
    EntriesLogged,
    /// Today's effective value.
    TodayValue,
    /// Best streak found anywhere in history.
    BestStreak,
    /// Successful days among the trailing evaluation window.
    WindowDays,
}

/// One declarative milestone: a driving quantity, a threshold, and the badge
/// metadata shown to the user.
#[derive(Debug, Clone)]
pub struct MilestoneDef {
    pub id: &'static str,
    pub title: &'static str,
    pub description: String,
    pub reward_points: u32,
    pub rarity: Rarity,
    pub driver: Driver,
    pub threshold: f64,
}

/// Snapshot of the derived quantities milestones are judged against.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measures {
    pub today_value: f64,
    pub best_streak: u32,
    pub entries_logged: u32,
    pub window_days: u32,
}

impl Measures {
    fn get(&self, driver: Driver) -> f64 {
        match driver {
            Driver::EntriesLogged => f64::from(self.entries_logged),
            Driver::TodayValue => self.today_value,
            Driver::BestStreak => f64::from(self.best_streak),
            Driver::WindowDays => f64::from(self.window_days),
        }
    }
}

/// Judge every definition against the measures. Definitions are independent
/// of each other, so the input order carries through to the output unchanged
/// but never affects any individual verdict.
pub fn evaluate(defs: &[MilestoneDef], measures: &Measures) -> (Vec<MilestoneStatus>, u32) {
    let mut statuses = Vec::with_capacity(defs.len());
    let mut total_points = 0u32;

    for def in defs {
        let driving = measures.get(def.driver);
        let achieved = driving >= def.threshold;
        let progress_percent = if achieved {
            100.0
        } else {
            (driving / def.threshold * 100.0).clamp(0.0, 100.0)
        };
        if achieved {
            total_points += def.reward_points;
        }
        statuses.push(MilestoneStatus {
            id: def.id.to_string(),
            title: def.title.to_string(),
            description: def.description.clone(),
            reward_points: def.reward_points,
            rarity: def.rarity,
            progress_percent,
            achieved,
        });
    }

    (statuses, total_points)
}

/// The standard per-metric catalog. Every metric gets the same five shapes
/// (first entry, half goal, full goal, 7- and 30-day streak) plus a
/// perfect-window badge when an evaluation window is configured; only the
/// titles and descriptions differ.
pub fn catalog_for(metric: Metric, goal: &GoalConfig) -> Vec<MilestoneDef> {
    let unit = metric.unit();
    let target = goal.daily_target;

    let (first, half, full, week, month) = match metric {
        Metric::Water => (
            "First Sip",
            "Halfway There",
            "Daily Hydration",
            "Hydration Week",
            "Hydration Habit",
        ),
        Metric::Weight => (
            "First Weigh-In",
            "Halfway to Target",
            "At Target",
            "Steady Week",
            "Steady Month",
        ),
        Metric::Meditation => (
            "First Session",
            "Warming Up",
            "Daily Practice",
            "Mindful Week",
            "Mindful Month",
        ),
    };

    let mut defs = vec![
        MilestoneDef {
            id: "first_entry",
            title: first,
            description: format!("Log your first {} entry", metric.as_str()),
            reward_points: 10,
            rarity: Rarity::Common,
            driver: Driver::EntriesLogged,
            threshold: 1.0,
        },
        MilestoneDef {
            id: "half_goal",
            title: half,
            description: format!("Reach {} {} today", target / 2.0, unit),
            reward_points: 15,
            rarity: Rarity::Common,
            driver: Driver::TodayValue,
            threshold: target / 2.0,
        },
        MilestoneDef {
            id: "daily_goal",
            title: full,
            description: format!("Reach your daily goal of {} {}", target, unit),
            reward_points: 25,
            rarity: Rarity::Rare,
            driver: Driver::TodayValue,
            threshold: target,
        },
        MilestoneDef {
            id: "streak_7",
            title: week,
            description: "Meet your goal 7 days in a row".to_string(),
            reward_points: 70,
            rarity: Rarity::Epic,
            driver: Driver::BestStreak,
            threshold: 7.0,
        },
        MilestoneDef {
            id: "streak_30",
            title: month,
            description: "Meet your goal 30 days in a row".to_string(),
            reward_points: 250,
            rarity: Rarity::Legendary,
            driver: Driver::BestStreak,
            threshold: 30.0,
        },
    ];

    if let Some(window) = goal.evaluation_window {
        let title = match window {
            7 => "Perfect Week",
            30 => "Perfect Month",
            _ => "Perfect Run",
        };
        defs.push(MilestoneDef {
            id: "perfect_window",
            title,
            description: format!("Meet your goal on each of the last {} days", window),
            reward_points: 100,
            rarity: Rarity::Epic,
            driver: Driver::WindowDays,
            threshold: f64::from(window),
        });
    }

    defs
}
