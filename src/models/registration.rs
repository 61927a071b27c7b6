use super::work_item::WorkItem;
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};

/// What the user chose in the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub item: WorkItem,
    pub hours: f64,
}

impl Registration {
    pub fn new(item: WorkItem, hours: f64) -> Self {
        Self { item, hours }
    }
}

/// One completed registration, as kept in `registration_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationHistoryEntry {
    #[serde(rename = "datetime")]
    pub timestamp: DateTime<FixedOffset>,
    #[serde(rename = "issue_number")]
    pub item_id: u64,
    #[serde(rename = "issue_title", default)]
    pub item_title: String,
    #[serde(rename = "time_spent")]
    pub hours: f64,
}

impl RegistrationHistoryEntry {
    pub fn from_registration<Tz: TimeZone>(reg: &Registration, at: &DateTime<Tz>) -> Self {
        Self {
            timestamp: at.fixed_offset(),
            item_id: reg.item.id,
            item_title: reg.item.title.clone(),
            hours: reg.hours,
        }
    }
}

/// The most recent registration, used to pre-select the item in the picker.
#[derive(Debug, Clone, PartialEq)]
pub struct LastRegistration {
    pub item_id: u64,
    pub hours: f64,
    pub timestamp: Option<DateTime<FixedOffset>>,
}
