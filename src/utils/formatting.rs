//! Formatting utilities used for CLI output.

use chrono::{DateTime, FixedOffset};

pub fn pad_right(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}

/// 1.5 → "1h 30m", 4.0 → "4h".
pub fn hours2readable(hours: f64) -> String {
    let total = (hours * 60.0).round() as i64;
    let (h, m) = (total / 60, total % 60);

    match (h, m) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m:02}m"),
    }
}

pub fn format_timestamp(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%d/%m/%Y %H:%M").to_string()
}
