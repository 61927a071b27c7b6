//! Application-wide defaults.

pub const APPLICATION_NAME: &str = "zup";

pub const DEFAULT_TP_URL: &str = "https://tern.tpondemand.com/";
pub const DEFAULT_TP_TEAM_NAME: &str = "Aces";
pub const DEFAULT_TP_TAKE: u32 = 50;

pub const DEFAULT_SCHEDULE_TYPE: &str = "schedule";
pub const DEFAULT_SCHEDULE_LIST: [&str; 3] = ["06:00", "11:00", "14:00"];
pub const DEFAULT_INTERVAL_HOURS: u32 = 0;
pub const DEFAULT_INTERVAL_MINUTES: u32 = 15;

pub const DEFAULT_TICK_SECONDS: u64 = 60;

/// Hour of day used by the "next day" and "next Monday" snoozes.
pub const SNOOZE_WAKE_HOUR: u32 = 6;

/// Snooze applied when the prompt is closed without an answer.
pub const DISMISS_SNOOZE_MINUTES: i64 = 15;

/// Registration history keeps only this many entries.
pub const HISTORY_LIMIT: usize = 5;
