use crate::constants::HISTORY_LIMIT;
use crate::errors::AppResult;
use crate::models::{LastRegistration, Registration, RegistrationHistoryEntry, WorkItem};
use crate::store::{KeyValueStore, keys};
use chrono::{DateTime, TimeZone};
use serde_json::{Value, json};
use tracing::warn;

/// Append `entry` and keep only the most recent [`HISTORY_LIMIT`] entries,
/// oldest first.
pub fn record(
    mut history: Vec<RegistrationHistoryEntry>,
    entry: RegistrationHistoryEntry,
) -> Vec<RegistrationHistoryEntry> {
    history.push(entry);
    if history.len() > HISTORY_LIMIT {
        let excess = history.len() - HISTORY_LIMIT;
        history.drain(..excess);
    }
    history
}

pub fn load_history<S: KeyValueStore>(store: &S) -> AppResult<Vec<RegistrationHistoryEntry>> {
    let items = match store.get(keys::REGISTRATION_HISTORY)? {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!(value = %other, "registration_history is not a list, ignoring it");
            return Ok(Vec::new());
        }
    };

    let history = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(entry = %item, error = %e, "skipping malformed history entry");
                None
            }
        })
        .collect();

    Ok(history)
}

/// Store a completed registration: append it to the history ring and
/// remember it as the last registration. The ring and the
/// `last_registration_*` keys are written in a single `set_many`.
pub fn record_registration<S: KeyValueStore, Tz: TimeZone>(
    store: &mut S,
    registration: &Registration,
    at: &DateTime<Tz>,
) -> AppResult<Vec<RegistrationHistoryEntry>> {
    let entry = RegistrationHistoryEntry::from_registration(registration, at);
    let history = record(load_history(store)?, entry.clone());

    store.set_many(vec![
        (keys::LAST_REGISTRATION_ISSUE_NUMBER, json!(entry.item_id)),
        (keys::LAST_REGISTRATION_TIME_SPENT, json!(entry.hours)),
        (
            keys::LAST_REGISTRATION_DATETIME,
            json!(entry.timestamp.to_rfc3339()),
        ),
        (keys::REGISTRATION_HISTORY, serde_json::to_value(&history)?),
    ])?;

    Ok(history)
}

pub fn last_registration<S: KeyValueStore>(store: &S) -> AppResult<Option<LastRegistration>> {
    let Some(item_id) = store
        .get(keys::LAST_REGISTRATION_ISSUE_NUMBER)?
        .and_then(|v| v.as_u64())
    else {
        return Ok(None);
    };

    let hours = store
        .get(keys::LAST_REGISTRATION_TIME_SPENT)?
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);

    let timestamp = store
        .get(keys::LAST_REGISTRATION_DATETIME)?
        .and_then(|v| v.as_str().map(str::to_string))
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok());

    Ok(Some(LastRegistration {
        item_id,
        hours,
        timestamp,
    }))
}

/// Index of the last used item among `items`, for pre-selecting it.
pub fn preselect(items: &[WorkItem], last: Option<&LastRegistration>) -> Option<usize> {
    let last = last?;
    items.iter().position(|item| item.id == last.item_id)
}
