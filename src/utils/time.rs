//! Time utilities: parsing HH:MM and durations, resolving wall-clock times.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// The instant at which the wall clock of `tz` shows `time` on `date`.
///
/// Ambiguous times (clocks going back) resolve to the earlier instant. Times
/// skipped by a forward transition resolve to one hour later.
pub fn local_datetime<Tz: TimeZone>(
    tz: &Tz,
    date: NaiveDate,
    time: NaiveTime,
) -> AppResult<DateTime<Tz>> {
    let naive = date.and_time(time);

    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .ok_or_else(|| AppError::InvalidTime(format!("{naive} does not exist in this timezone")))
}

/// Parse a time-spent value: plain hours ("1.5"), or with a unit suffix
/// ("4h", "30m", "1d" where a day is 8 hours).
pub fn parse_hours(s: &str) -> AppResult<f64> {
    let s = s.trim().to_lowercase();
    let invalid = || AppError::InvalidArgument(format!("invalid time spent '{s}'"));

    let (number, factor) = if let Some(n) = s.strip_suffix('h') {
        (n, 1.0)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 1.0 / 60.0)
    } else if let Some(n) = s.strip_suffix('d') {
        (n, 8.0)
    } else {
        (s.as_str(), 1.0)
    };

    let value: f64 = number.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }

    Ok(value * factor)
}
