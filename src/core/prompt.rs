//! Lifecycle of a single prompt.
//!
//! ```text
//! Idle --tick (due) / open_manually--> Prompted
//! Prompted --register | cancel | snooze | dismiss--> Idle
//! ```

use crate::api::WorkItemApi;
use crate::constants::DISMISS_SNOOZE_MINUTES;
use crate::core::due::{due_now, read_next_run};
use crate::core::history::{last_registration, preselect, record_registration};
use crate::core::scheduler::{reschedule, snooze_and_persist};
use crate::core::submit::{CompletionCallback, dispatch_submission};
use crate::errors::{AppError, AppResult};
use crate::models::{NextRun, Registration, WorkItem};
use crate::store::KeyValueStore;
use chrono::{DateTime, TimeZone};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    Idle,
    /// `manual` is set when the user asked for the prompt ahead of schedule.
    Prompted { manual: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    NotDue,
    /// A prompt was opened.
    Due,
    /// A prompt is already open; nothing was checked.
    AlreadyOpen,
}

#[derive(Debug)]
pub enum Resolution {
    Registered {
        next_run: NextRun,
    },
    Cancelled {
        next_run: NextRun,
    },
    Snoozed {
        next_run: NextRun,
    },
    Dismissed {
        next_run: NextRun,
    },
}

impl Resolution {
    pub fn next_run(&self) -> NextRun {
        match self {
            Resolution::Registered { next_run }
            | Resolution::Cancelled { next_run }
            | Resolution::Snoozed { next_run }
            | Resolution::Dismissed { next_run } => *next_run,
        }
    }
}

/// Callback run on the submission thread once the service has answered.
pub type SubmissionHook = Arc<dyn Fn(u64, &AppResult<()>) + Send + Sync>;

pub struct PromptCycle<S: KeyValueStore> {
    store: S,
    api: Arc<dyn WorkItemApi>,
    state: PromptState,
    on_submitted: Option<SubmissionHook>,
    pending: Vec<JoinHandle<()>>,
}

impl<S: KeyValueStore> PromptCycle<S> {
    pub fn new(store: S, api: Arc<dyn WorkItemApi>) -> Self {
        Self {
            store,
            api,
            state: PromptState::Idle,
            on_submitted: None,
            pending: Vec::new(),
        }
    }

    pub fn with_submission_hook(mut self, hook: SubmissionHook) -> Self {
        self.on_submitted = Some(hook);
        self
    }

    pub fn state(&self) -> PromptState {
        self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hand back the store. Submissions still running are detached; call
    /// [`PromptCycle::join_submissions`] first to wait for them.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Submissions dispatched and not yet finished.
    pub fn pending_submissions(&mut self) -> usize {
        self.pending.retain(|handle| !handle.is_finished());
        self.pending.len()
    }

    /// Block until every dispatched submission is done. Returns how many
    /// workers panicked.
    pub fn join_submissions(&mut self) -> usize {
        self.pending
            .drain(..)
            .map(JoinHandle::join)
            .filter(Result::is_err)
            .count()
    }

    /// Periodic check: open a prompt when one is due.
    pub fn tick<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> TickOutcome {
        if matches!(self.state, PromptState::Prompted { .. }) {
            debug!("prompt is already open");
            return TickOutcome::AlreadyOpen;
        }

        if due_now(&self.store, now) {
            info!("time to pop up the registration prompt");
            self.state = PromptState::Prompted { manual: false };
            TickOutcome::Due
        } else {
            TickOutcome::NotDue
        }
    }

    /// "Log work now": open the prompt whether or not it is due.
    pub fn open_manually(&mut self) {
        debug!("prompt opened manually");
        self.state = PromptState::Prompted { manual: true };
    }

    /// Candidate items plus the index of the last used one, if listed.
    pub fn candidates(&self) -> (Vec<WorkItem>, Option<usize>) {
        let items = self.api.list_candidate_items();
        let last = match last_registration(&self.store) {
            Ok(last) => last,
            Err(e) => {
                warn!(error = %e, "cannot read last registration");
                None
            }
        };
        let selected = preselect(&items, last.as_ref());
        (items, selected)
    }

    fn ensure_prompted(&self) -> AppResult<()> {
        match self.state {
            PromptState::Prompted { .. } => Ok(()),
            PromptState::Idle => Err(AppError::NoPrompt),
        }
    }

    /// Submit the registration in the background, move the schedule forward,
    /// and record it.
    ///
    /// The prompt is closed once the submission has been dispatched, even if
    /// the store writes afterwards fail, so the same time is never sent twice.
    /// The worker is tracked by the cycle on every path; see
    /// [`PromptCycle::join_submissions`]. `next_run` is written before the
    /// history so a failed history write does not bring the prompt back.
    pub fn register<Tz: TimeZone>(
        &mut self,
        registration: Registration,
        now: &DateTime<Tz>,
    ) -> AppResult<Resolution> {
        self.ensure_prompted()?;
        info!(
            item_id = registration.item.id,
            hours = registration.hours,
            "register work"
        );

        let callback: Option<CompletionCallback> = self.on_submitted.clone().map(|hook| {
            let item_id = registration.item.id;
            Box::new(move |result: &AppResult<()>| hook(item_id, result)) as CompletionCallback
        });
        let submission = dispatch_submission(
            Arc::clone(&self.api),
            registration.item.id,
            registration.hours,
            callback,
        )?;
        self.pending.push(submission);
        self.state = PromptState::Idle;

        let next_run = reschedule(&mut self.store, now)?;
        record_registration(&mut self.store, &registration, now)?;

        Ok(Resolution::Registered { next_run })
    }

    pub fn cancel<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> AppResult<Resolution> {
        self.ensure_prompted()?;
        debug!("prompt cancelled");

        let next_run = reschedule(&mut self.store, now)?;
        self.state = PromptState::Idle;
        Ok(Resolution::Cancelled { next_run })
    }

    pub fn snooze<Tz: TimeZone>(
        &mut self,
        duration_minutes: i64,
        now: &DateTime<Tz>,
    ) -> AppResult<Resolution> {
        self.ensure_prompted()?;

        let next_run = snooze_and_persist(&mut self.store, duration_minutes, now)?;
        self.state = PromptState::Idle;
        Ok(Resolution::Snoozed { next_run })
    }

    /// The prompt was closed without an answer. An overdue prompt comes
    /// back after a short snooze; a manual one leaves the schedule alone.
    pub fn dismiss<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> AppResult<Resolution> {
        self.ensure_prompted()?;

        let current = read_next_run(&self.store);
        let overdue = match current.timestamp() {
            None => true,
            Some(next) => next < now.fixed_offset(),
        };

        let next_run = if overdue {
            snooze_and_persist(&mut self.store, DISMISS_SNOOZE_MINUTES, now)?
        } else {
            current
        };

        self.state = PromptState::Idle;
        Ok(Resolution::Dismissed { next_run })
    }
}
