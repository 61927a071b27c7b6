use chrono::{DateTime, FixedOffset, TimeZone};
use serde_json::Value;
use std::fmt;
use tracing::warn;

/// The moment the next prompt becomes eligible.
///
/// Empty means "never scheduled", which is always due. The timestamp is kept
/// with its UTC offset so it round-trips through the store unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NextRun(Option<DateTime<FixedOffset>>);

impl NextRun {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn at<Tz: TimeZone>(when: &DateTime<Tz>) -> Self {
        Self(Some(when.fixed_offset()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.0
    }

    /// Parse the stored ISO-8601 form. Anything unreadable counts as empty.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::empty();
        }

        match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => Self(Some(dt)),
            Err(e) => {
                warn!(value = raw, error = %e, "unreadable next_run, treating it as empty");
                Self::empty()
            }
        }
    }

    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Null => Self::empty(),
            other => {
                warn!(value = %other, "next_run is not a string, treating it as empty");
                Self::empty()
            }
        }
    }

    pub fn to_iso_string(&self) -> String {
        self.0.map(|dt| dt.to_rfc3339()).unwrap_or_default()
    }

    pub fn to_value(&self) -> Value {
        Value::String(self.to_iso_string())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for NextRun {
    fn from(when: DateTime<Tz>) -> Self {
        Self::at(&when)
    }
}

impl fmt::Display for NextRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S %:z")),
            None => write!(f, "never"),
        }
    }
}
