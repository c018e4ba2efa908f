//! Text formatting for durations, times and dates shown in the terminal.

use crate::libs::calendar;
use chrono::NaiveDate;

/// Formats minutes as `HH:MM`. Negative values are shown as `00:00`.
///
/// ```rust
/// use daylog::libs::formatter::format_minutes;
///
/// assert_eq!(format_minutes(90), "01:30");
/// assert_eq!(format_minutes(0), "00:00");
/// assert_eq!(format_minutes(-5), "00:00");
/// assert_eq!(format_minutes(24 * 60 + 5), "24:05");
/// ```
pub fn format_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Local time of day of an epoch-millisecond timestamp, as `HH:MM`.
pub fn format_time(timestamp: i64) -> String {
    calendar::to_local(timestamp).format("%H:%M").to_string()
}

/// Local date and time of an epoch-millisecond timestamp.
pub fn format_datetime(timestamp: i64) -> String {
    calendar::to_local(timestamp).format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%a %Y-%m-%d").to_string()
}

/// `25.0` -> `"25.0%"`.
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Horizontal bar of `width` cells, filled to `percent` of 100.
pub fn format_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0 * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "·".repeat(width - filled))
}
