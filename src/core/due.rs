use crate::models::NextRun;
use crate::store::{KeyValueStore, keys};
use chrono::{DateTime, TimeZone};
use tracing::{debug, warn};

/// Whether a prompt should be shown at `now`.
///
/// An empty `next_run` has never been scheduled and is always due. The
/// boundary is inclusive: a prompt scheduled for exactly `now` is due.
pub fn is_due<Tz: TimeZone>(next_run: &NextRun, now: &DateTime<Tz>) -> bool {
    match next_run.timestamp() {
        None => true,
        Some(next) => next <= now.fixed_offset(),
    }
}

/// Read `next_run` from the store. Read failures count as "never scheduled".
pub fn read_next_run<S: KeyValueStore>(store: &S) -> NextRun {
    match store.get(keys::NEXT_RUN) {
        Ok(Some(value)) => NextRun::from_value(&value),
        Ok(None) => NextRun::empty(),
        Err(e) => {
            warn!(error = %e, "cannot read next_run, assuming a prompt is due");
            NextRun::empty()
        }
    }
}

/// [`is_due`] against the persisted `next_run`.
pub fn due_now<S: KeyValueStore, Tz: TimeZone>(store: &S, now: &DateTime<Tz>) -> bool {
    let next_run = read_next_run(store);
    let due = is_due(&next_run, now);

    if next_run.is_empty() {
        debug!("never scheduled, prompting right away");
    } else {
        debug!(next_run = %next_run, due, "checked next run");
    }

    due
}
