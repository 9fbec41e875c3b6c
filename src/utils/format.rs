/// Format a value as a decimal string, trimming trailing zeros
pub fn format_value(value: f64) -> String {
    if value == value.floor() {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Format minutes to "Xh Ym" or "Ym" string
pub fn format_minutes(minutes: f64) -> String {
    let total = minutes.round() as i64;
    if total >= 60 {
        format!("{}h {}m", total / 60, total % 60)
    } else {
        format!("{}m", total)
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(value: f64, target: f64, width: usize) -> String {
    if target <= 0.0 {
        return "░".repeat(width);
    }
    let ratio = (value / target).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value_trims_zeros() {
        assert_eq!(format_value(2000.0), "2000");
        assert_eq!(format_value(71.5), "71.5");
        assert_eq!(format_value(0.0), "0");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(45.0), "45m");
        assert_eq!(format_minutes(90.0), "1h 30m");
    }

    #[test]
    fn test_progress_bar_caps_at_full() {
        assert_eq!(progress_bar(3000.0, 2000.0, 4), "████");
        assert_eq!(progress_bar(0.0, 2000.0, 4), "░░░░");
        assert_eq!(progress_bar(1000.0, 2000.0, 4), "██░░");
    }
}
