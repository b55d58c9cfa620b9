//! Reusable formatting utilities for CLI output

use chrono::{TimeZone, Utc};

/// Format epoch seconds as a local date/time string.
///
/// Returns "N/A" for timestamps chrono cannot represent.
///
/// # Example output
/// `01/15/2025 14:30`
pub fn format_epoch_local(epoch_secs: i64) -> String {
    match Utc.timestamp_opt(epoch_secs, 0) {
        chrono::LocalResult::Single(dt) => dt
            .with_timezone(&chrono::Local)
            .format("%m/%d/%Y %H:%M")
            .to_string(),
        _ => "N/A".to_string(),
    }
}

/// Format a number of seconds as a human-readable span.
///
/// # Example output
/// - `3d 4h` (days, hours)
/// - `2h 15m` (hours, minutes)
/// - `5m 10s` (minutes, seconds)
/// - `45s` (seconds only)
pub fn format_span(seconds: i64) -> String {
    let secs = seconds.max(0);

    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_epoch_local_valid() {
        // Jan 15, 2025 12:00:00 UTC; exact output depends on local TZ
        let result = format_epoch_local(1_736_942_400);
        assert!(result.contains("2025"));
    }

    #[test]
    fn test_format_epoch_local_out_of_range() {
        assert_eq!(format_epoch_local(i64::MAX), "N/A");
    }

    #[test]
    fn test_format_span_days() {
        assert_eq!(format_span(3 * 86_400 + 4 * 3600 + 59), "3d 4h");
    }

    #[test]
    fn test_format_span_hours() {
        assert_eq!(format_span(3661), "1h 1m");
        assert_eq!(format_span(7200), "2h 0m");
    }

    #[test]
    fn test_format_span_minutes() {
        assert_eq!(format_span(125), "2m 5s");
    }

    #[test]
    fn test_format_span_seconds() {
        assert_eq!(format_span(45), "45s");
        assert_eq!(format_span(0), "0s");
        assert_eq!(format_span(-10), "0s");
    }
}
