//! Next-run computation: reschedule after a resolved prompt, and snooze.

use crate::constants::SNOOZE_WAKE_HOUR;
use crate::core::due::read_next_run;
use crate::errors::{AppError, AppResult};
use crate::models::{NextRun, ScheduleConfig, TimeOfDay};
use crate::store::{KeyValueStore, keys};
use crate::utils::time::local_datetime;
use chrono::{DateTime, Datelike, Days, Duration, NaiveTime, TimeZone};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// A validated snooze request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnoozeDuration {
    Minutes(u32),
    /// Tomorrow at 06:00.
    NextDay,
    /// Next Monday at 06:00, a full week ahead when today is Monday.
    NextMonday,
}

impl SnoozeDuration {
    /// Decode the signed minute count used by the snooze menu:
    /// positive values are minutes, -1 is "next day", -2 is "next Monday".
    pub fn from_minutes(minutes: i64) -> AppResult<Self> {
        match minutes {
            -1 => Ok(SnoozeDuration::NextDay),
            -2 => Ok(SnoozeDuration::NextMonday),
            m if m > 0 => u32::try_from(m)
                .map(SnoozeDuration::Minutes)
                .map_err(|_| AppError::InvalidArgument(format!("snooze of {m} minutes is too long"))),
            m => Err(AppError::InvalidArgument(format!(
                "invalid snooze duration {m}: use a positive number of minutes, -1 (next day) or -2 (next Monday)"
            ))),
        }
    }
}

impl TryFrom<i64> for SnoozeDuration {
    type Error = AppError;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        Self::from_minutes(minutes)
    }
}

/// Compute the run that follows a resolved prompt.
///
/// A `current` run that is still at or after `now` means the prompt was
/// opened by hand ahead of schedule; it is returned unchanged so a manual
/// run never pulls the schedule backward.
pub fn schedule_next<Tz: TimeZone>(
    current: &NextRun,
    config: &ScheduleConfig,
    now: &DateTime<Tz>,
) -> AppResult<NextRun> {
    if let Some(next) = current.timestamp()
        && next >= now.fixed_offset()
    {
        debug!(next_run = %current, "executed manually, won't reschedule");
        return Ok(*current);
    }

    let next = match config {
        ScheduleConfig::FixedTimes(times) => next_fixed_time(times, now)?,
        ScheduleConfig::Interval { .. } => {
            let step = config.interval_duration().unwrap_or_else(Duration::zero);
            if step.is_zero() {
                warn!("zero interval, every tick will prompt");
            }
            now.clone()
                .checked_add_signed(step)
                .ok_or_else(|| AppError::InvalidArgument(format!("interval {config} overflows")))?
        }
    };

    Ok(NextRun::at(&next))
}

/// First configured time still ahead today, else the earliest one tomorrow.
fn next_fixed_time<Tz: TimeZone>(
    times: &BTreeSet<TimeOfDay>,
    now: &DateTime<Tz>,
) -> AppResult<DateTime<Tz>> {
    let tz = now.timezone();
    let today = now.date_naive();

    for time in times {
        let candidate = local_datetime(&tz, today, time.as_naive_time())?;
        if candidate > *now {
            return Ok(candidate);
        }
    }

    let first = times
        .first()
        .ok_or_else(|| AppError::InvalidArgument("a fixed schedule needs at least one time".into()))?;
    let tomorrow = today
        .checked_add_days(Days::new(1))
        .ok_or_else(|| AppError::InvalidTime(format!("no day after {today}")))?;

    local_datetime(&tz, tomorrow, first.as_naive_time())
}

/// Compute the run after a snooze of `duration_minutes` (see
/// [`SnoozeDuration::from_minutes`] for the encoding).
pub fn snooze<Tz: TimeZone>(duration_minutes: i64, now: &DateTime<Tz>) -> AppResult<NextRun> {
    snooze_for(SnoozeDuration::from_minutes(duration_minutes)?, now)
}

pub fn snooze_for<Tz: TimeZone>(duration: SnoozeDuration, now: &DateTime<Tz>) -> AppResult<NextRun> {
    let tz = now.timezone();
    let today = now.date_naive();
    let wake = NaiveTime::from_hms_opt(SNOOZE_WAKE_HOUR, 0, 0)
        .ok_or_else(|| AppError::InvalidTime(format!("{SNOOZE_WAKE_HOUR}:00")))?;

    let next = match duration {
        SnoozeDuration::Minutes(m) => now.clone() + Duration::minutes(i64::from(m)),
        SnoozeDuration::NextDay => {
            let day = today
                .checked_add_days(Days::new(1))
                .ok_or_else(|| AppError::InvalidTime(format!("no day after {today}")))?;
            local_datetime(&tz, day, wake)?
        }
        SnoozeDuration::NextMonday => {
            let ahead = 7 - u64::from(today.weekday().num_days_from_monday());
            let day = today
                .checked_add_days(Days::new(ahead))
                .ok_or_else(|| AppError::InvalidTime(format!("no Monday after {today}")))?;
            local_datetime(&tz, day, wake)?
        }
    };

    Ok(NextRun::at(&next))
}

/// Reschedule from the persisted state and write the result back.
///
/// Nothing is written when the run is kept (manual run). A failed write is
/// returned as is, leaving the stored `next_run` untouched.
pub fn reschedule<S: KeyValueStore, Tz: TimeZone>(
    store: &mut S,
    now: &DateTime<Tz>,
) -> AppResult<NextRun> {
    let current = read_next_run(store);
    let config = ScheduleConfig::from_store(store)?;
    let next = schedule_next(&current, &config, now)?;

    if next != current {
        store.set(keys::NEXT_RUN, next.to_value())?;
        info!(next_run = %next, schedule = %config, "scheduled next run");
    }

    Ok(next)
}

/// Snooze and write the new run to the store.
pub fn snooze_and_persist<S: KeyValueStore, Tz: TimeZone>(
    store: &mut S,
    duration_minutes: i64,
    now: &DateTime<Tz>,
) -> AppResult<NextRun> {
    let duration = SnoozeDuration::from_minutes(duration_minutes)?;
    debug!(?duration, "snooze");

    let next = snooze_for(duration, now)?;
    store.set(keys::NEXT_RUN, next.to_value())?;
    info!(next_run = %next, "snoozed");

    Ok(next)
}
