use crate::constants::{
    DEFAULT_INTERVAL_HOURS, DEFAULT_INTERVAL_MINUTES, DEFAULT_SCHEDULE_LIST, DEFAULT_SCHEDULE_TYPE,
};
use crate::errors::{AppError, AppResult};
use crate::store::{KeyValueStore, keys};
use crate::utils::time::parse_time;
use chrono::{Duration, NaiveTime, Timelike};
use serde_json::{Value, json};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A wall-clock time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> AppResult<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| AppError::InvalidTime(format!("{hour:02}:{minute:02}")))
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }
}

impl FromStr for TimeOfDay {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s.trim())
            .map(Self)
            .ok_or_else(|| AppError::InvalidTime(s.to_string()))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// How prompts are spread over the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleConfig {
    /// Prompt at each of these times every day. Never empty.
    FixedTimes(BTreeSet<TimeOfDay>),
    /// Prompt again this long after the previous resolution.
    Interval { hours: u32, minutes: u32 },
}

fn default_times() -> BTreeSet<TimeOfDay> {
    DEFAULT_SCHEDULE_LIST
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        ScheduleConfig::FixedTimes(default_times())
    }
}

impl ScheduleConfig {
    pub fn fixed_times<I: IntoIterator<Item = TimeOfDay>>(times: I) -> AppResult<Self> {
        let set: BTreeSet<TimeOfDay> = times.into_iter().collect();
        if set.is_empty() {
            return Err(AppError::InvalidArgument(
                "a fixed schedule needs at least one time".into(),
            ));
        }
        Ok(ScheduleConfig::FixedTimes(set))
    }

    /// Build a fixed schedule from "HH:MM" strings. Entries that normalize
    /// to the same time collapse into one.
    pub fn parse_fixed_times<S: AsRef<str>>(list: &[S]) -> AppResult<Self> {
        let times = list
            .iter()
            .map(|s| s.as_ref().parse::<TimeOfDay>())
            .collect::<AppResult<Vec<_>>>()?;
        Self::fixed_times(times)
    }

    pub fn interval(hours: u32, minutes: u32) -> Self {
        ScheduleConfig::Interval { hours, minutes }
    }

    /// Parse "H:MM" (or a bare number of minutes) into an interval schedule.
    pub fn parse_interval(s: &str) -> AppResult<Self> {
        let s = s.trim();
        let invalid = || AppError::InvalidArgument(format!("invalid interval '{s}', expected H:MM"));

        let (hours, minutes) = match s.split_once(':') {
            Some((h, m)) => (
                h.parse::<u32>().map_err(|_| invalid())?,
                m.parse::<u32>().map_err(|_| invalid())?,
            ),
            None => (0, s.parse::<u32>().map_err(|_| invalid())?),
        };

        Ok(Self::interval(hours, minutes))
    }

    pub fn schedule_type(&self) -> &'static str {
        match self {
            ScheduleConfig::FixedTimes(_) => "schedule",
            ScheduleConfig::Interval { .. } => "interval",
        }
    }

    pub fn interval_duration(&self) -> Option<Duration> {
        match self {
            ScheduleConfig::Interval { hours, minutes } => {
                Some(Duration::hours(i64::from(*hours)) + Duration::minutes(i64::from(*minutes)))
            }
            ScheduleConfig::FixedTimes(_) => None,
        }
    }

    /// Load and validate the schedule from the store.
    ///
    /// Missing keys take the defaults. Present but malformed values are
    /// rejected instead of being patched over.
    pub fn from_store<S: KeyValueStore>(store: &S) -> AppResult<Self> {
        let kind = store.get_or(keys::SCHEDULE_TYPE, json!(DEFAULT_SCHEDULE_TYPE))?;

        match kind.as_str() {
            Some("schedule") => Self::fixed_times(Self::stored_times(store)?),
            Some("interval") => {
                let hours = read_count(store, keys::INTERVAL_HOURS, DEFAULT_INTERVAL_HOURS)?;
                let minutes = read_count(store, keys::INTERVAL_MINUTES, DEFAULT_INTERVAL_MINUTES)?;
                Ok(Self::interval(hours, minutes))
            }
            _ => Err(AppError::InvalidArgument(format!(
                "{} must be \"schedule\" or \"interval\", found {}",
                keys::SCHEDULE_TYPE,
                kind
            ))),
        }
    }

    /// The daily times kept in `schedule_list`, whatever the active mode.
    pub fn stored_times<S: KeyValueStore>(store: &S) -> AppResult<BTreeSet<TimeOfDay>> {
        let Some(raw) = store.get(keys::SCHEDULE_LIST)? else {
            return Ok(default_times());
        };

        let items = match raw {
            Value::Array(items) => items,
            other => {
                return Err(AppError::InvalidArgument(format!(
                    "{} must be a list of HH:MM strings, found {}",
                    keys::SCHEDULE_LIST,
                    other
                )));
            }
        };

        items
            .iter()
            .map(|v| {
                v.as_str()
                    .ok_or_else(|| {
                        AppError::InvalidArgument(format!(
                            "{} entry {} is not a string",
                            keys::SCHEDULE_LIST,
                            v
                        ))
                    })
                    .and_then(str::parse::<TimeOfDay>)
            })
            .collect()
    }

    pub fn to_store<S: KeyValueStore>(&self, store: &mut S) -> AppResult<()> {
        match self {
            ScheduleConfig::FixedTimes(times) => {
                let list: Vec<String> = times.iter().map(ToString::to_string).collect();
                store.set(keys::SCHEDULE_LIST, json!(list))?;
            }
            ScheduleConfig::Interval { hours, minutes } => {
                store.set(keys::INTERVAL_HOURS, json!(hours))?;
                store.set(keys::INTERVAL_MINUTES, json!(minutes))?;
            }
        }
        store.set(keys::SCHEDULE_TYPE, json!(self.schedule_type()))
    }
}

fn read_count<S: KeyValueStore>(store: &S, key: &str, default: u32) -> AppResult<u32> {
    match store.get(key)? {
        None => Ok(default),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                AppError::InvalidArgument(format!("{key} must be a non-negative integer, found {v}"))
            }),
    }
}

impl fmt::Display for ScheduleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleConfig::FixedTimes(times) => {
                let list: Vec<String> = times.iter().map(ToString::to_string).collect();
                write!(f, "daily at {}", list.join(", "))
            }
            ScheduleConfig::Interval { hours, minutes } => {
                write!(f, "every {hours:02}:{minutes:02}")
            }
        }
    }
}
