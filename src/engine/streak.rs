use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Consecutive successful days ending at `today`. A day with no qualifying
/// value breaks the run exactly like a missing day; if today itself does not
/// qualify the streak is 0, no partial credit.
pub fn current(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut run = 0u32;
    let mut cursor = today;
    while days.contains(&cursor) {
        run += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    run
}

/// Longest run of consecutive successful days anywhere in history.
pub fn best(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for &day in days {
        run = match prev {
            Some(p) if p.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        best = best.max(run);
        prev = Some(day);
    }
    best
}

/// Successful days among the `window` calendar days ending at `today`.
pub fn trailing_window(days: &BTreeSet<NaiveDate>, today: NaiveDate, window: u32) -> u32 {
    (0..window)
        .filter(|offset| {
            today
                .checked_sub_days(chrono::Days::new(u64::from(*offset)))
                .map(|d| days.contains(&d))
                .unwrap_or(false)
        })
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn set(days: &[u32]) -> BTreeSet<NaiveDate> {
        days.iter().map(|&day| d(day)).collect()
    }

    #[test]
    fn test_empty_history() {
        let days = BTreeSet::new();
        assert_eq!(current(&days, d(15)), 0);
        assert_eq!(best(&days), 0);
    }

    #[test]
    fn test_current_requires_today() {
        // Run ended yesterday; today has nothing.
        let days = set(&[12, 13, 14]);
        assert_eq!(current(&days, d(15)), 0);
        assert_eq!(current(&days, d(14)), 3);
    }

    #[test]
    fn test_current_stops_at_gap() {
        let days = set(&[10, 11, 13, 14, 15]);
        assert_eq!(current(&days, d(15)), 3);
    }

    #[test]
    fn test_best_finds_historical_run() {
        // Five-day run earlier in the month beats the current two-day run.
        let days = set(&[1, 2, 3, 4, 5, 14, 15]);
        assert_eq!(best(&days), 5);
        assert_eq!(current(&days, d(15)), 2);
    }

    #[test]
    fn test_best_at_least_current() {
        let days = set(&[9, 10, 11, 12, 13, 14, 15]);
        let cur = current(&days, d(15));
        assert_eq!(cur, 7);
        assert!(best(&days) >= cur);
    }

    #[test]
    fn test_single_day() {
        let days = set(&[15]);
        assert_eq!(current(&days, d(15)), 1);
        assert_eq!(best(&days), 1);
    }

    #[test]
    fn test_trailing_window_counts_only_window() {
        // 10 successful days, but only the last 7 are in a 7-day window.
        let days = set(&[6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
        assert_eq!(trailing_window(&days, d(15), 7), 7);
    }

    #[test]
    fn test_trailing_window_with_gaps() {
        let days = set(&[10, 12, 15]);
        assert_eq!(trailing_window(&days, d(15), 7), 3);
        assert_eq!(trailing_window(&days, d(15), 3), 1);
    }
}
