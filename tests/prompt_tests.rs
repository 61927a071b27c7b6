use chrono::Duration;
use std::time::Duration as StdDuration;
use std::sync::{Arc, Mutex};
use zup::core::history::load_history;
use zup::core::{PromptCycle, PromptState, Resolution, TickOutcome};
use zup::errors::{AppError, AppResult};
use zup::models::{NextRun, Registration, WorkItem};
use zup::store::{KeyValueStore, MemoryStore, keys};

mod common;
use common::{BrokenStore, FakeApi, at};

fn store_with_next_run(next: NextRun) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.set(keys::NEXT_RUN, next.to_value()).unwrap();
    store
}

#[test]
fn test_tick_opens_prompt_once() {
    let mut cycle = PromptCycle::new(MemoryStore::new(), Arc::new(FakeApi::default()));
    let now = at(2026, 10, 19, 9, 0);

    assert_eq!(cycle.tick(&now), TickOutcome::Due);
    assert_eq!(cycle.state(), PromptState::Prompted { manual: false });
    assert_eq!(cycle.tick(&now), TickOutcome::AlreadyOpen);
}

#[test]
fn test_tick_before_next_run() {
    let store = store_with_next_run(NextRun::at(&at(2026, 10, 19, 11, 0)));
    let mut cycle = PromptCycle::new(store, Arc::new(FakeApi::default()));

    assert_eq!(cycle.tick(&at(2026, 10, 19, 10, 59)), TickOutcome::NotDue);
    assert_eq!(cycle.state(), PromptState::Idle);
    assert_eq!(cycle.tick(&at(2026, 10, 19, 11, 0)), TickOutcome::Due);
}

#[test]
fn test_resolving_without_prompt_fails() {
    let mut cycle = PromptCycle::new(MemoryStore::new(), Arc::new(FakeApi::default()));
    let now = at(2026, 10, 19, 9, 0);

    assert!(matches!(cycle.cancel(&now), Err(AppError::NoPrompt)));
    assert!(matches!(cycle.snooze(15, &now), Err(AppError::NoPrompt)));
    assert!(cycle.store().get(keys::NEXT_RUN).unwrap().is_none());
}

#[test]
fn test_register_submits_records_and_reschedules() {
    let api = Arc::new(FakeApi::default());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let hook_seen = Arc::clone(&seen);
    let mut cycle = PromptCycle::new(MemoryStore::new(), api.clone()).with_submission_hook(
        Arc::new(move |item_id: u64, result: &AppResult<()>| {
            hook_seen.lock().unwrap().push((item_id, result.is_ok()));
        }),
    );
    let now = at(2026, 10, 19, 12, 30);

    assert_eq!(cycle.tick(&now), TickOutcome::Due);
    let resolution = cycle
        .register(Registration::new(WorkItem::new(42, "Answer"), 2.0), &now)
        .unwrap();

    assert_eq!(resolution.next_run(), NextRun::at(&at(2026, 10, 19, 14, 0)));
    assert_eq!(cycle.state(), PromptState::Idle);

    assert!(matches!(resolution, Resolution::Registered { .. }));
    assert_eq!(cycle.join_submissions(), 0);

    assert_eq!(api.submissions(), vec![(42, 2.0)]);
    assert_eq!(*seen.lock().unwrap(), vec![(42, true)]);

    let history = load_history(cycle.store()).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].item_title, "Answer");
}

#[test]
fn test_failed_submission_is_not_surfaced() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let hook_seen = Arc::clone(&seen);
    let mut cycle = PromptCycle::new(MemoryStore::new(), Arc::new(FakeApi::failing()))
        .with_submission_hook(Arc::new(move |item_id: u64, result: &AppResult<()>| {
            hook_seen.lock().unwrap().push((item_id, result.is_ok()));
        }));
    let now = at(2026, 10, 19, 12, 30);

    cycle.open_manually();
    let resolution = cycle
        .register(Registration::new(WorkItem::new(5, "Five"), 1.0), &now)
        .unwrap();

    assert!(matches!(resolution, Resolution::Registered { .. }));
    assert_eq!(cycle.join_submissions(), 0);
    assert_eq!(*seen.lock().unwrap(), vec![(5, false)]);
    assert_eq!(load_history(cycle.store()).unwrap().len(), 1);
}

#[test]
fn test_manual_register_keeps_future_schedule() {
    let scheduled = NextRun::at(&at(2026, 10, 19, 14, 0));
    let mut cycle = PromptCycle::new(store_with_next_run(scheduled), Arc::new(FakeApi::default()));
    let now = at(2026, 10, 19, 12, 30);

    assert_eq!(cycle.tick(&now), TickOutcome::NotDue);
    cycle.open_manually();
    let resolution = cycle
        .register(Registration::new(WorkItem::new(1, "One"), 1.0), &now)
        .unwrap();

    assert_eq!(resolution.next_run(), scheduled);
    assert_eq!(
        cycle.store().get(keys::NEXT_RUN).unwrap(),
        Some(scheduled.to_value())
    );
}

#[test]
fn test_cancel_reschedules_without_submitting() {
    let api = Arc::new(FakeApi::default());
    let mut cycle = PromptCycle::new(MemoryStore::new(), api.clone());
    let now = at(2026, 10, 19, 15, 0);

    cycle.tick(&now);
    let resolution = cycle.cancel(&now).unwrap();

    assert!(matches!(resolution, Resolution::Cancelled { .. }));
    assert_eq!(resolution.next_run(), NextRun::at(&at(2026, 10, 20, 6, 0)));
    assert!(api.submissions().is_empty());
    assert!(load_history(cycle.store()).unwrap().is_empty());
}

#[test]
fn test_snooze_from_prompt() {
    let mut cycle = PromptCycle::new(MemoryStore::new(), Arc::new(FakeApi::default()));
    let now = at(2026, 10, 19, 15, 0);
    cycle.tick(&now);

    // a bad value leaves the prompt open
    assert!(matches!(cycle.snooze(-9, &now), Err(AppError::InvalidArgument(_))));
    assert!(matches!(cycle.state(), PromptState::Prompted { .. }));

    let resolution = cycle.snooze(-1, &now).unwrap();
    assert_eq!(resolution.next_run(), NextRun::at(&at(2026, 10, 20, 6, 0)));
    assert_eq!(cycle.state(), PromptState::Idle);
    assert_eq!(cycle.tick(&(now + Duration::hours(1))), TickOutcome::NotDue);
}

#[test]
fn test_dismiss_overdue_prompt_snoozes() {
    let mut cycle = PromptCycle::new(MemoryStore::new(), Arc::new(FakeApi::default()));
    let now = at(2026, 10, 19, 15, 0);
    cycle.tick(&now);

    let resolution = cycle.dismiss(&now).unwrap();
    assert!(matches!(resolution, Resolution::Dismissed { .. }));
    assert_eq!(resolution.next_run(), NextRun::at(&at(2026, 10, 19, 15, 15)));
}

#[test]
fn test_dismiss_manual_prompt_keeps_schedule() {
    let scheduled = NextRun::at(&at(2026, 10, 19, 16, 0));
    let mut cycle = PromptCycle::new(store_with_next_run(scheduled), Arc::new(FakeApi::default()));
    let now = at(2026, 10, 19, 15, 0);

    cycle.open_manually();
    let resolution = cycle.dismiss(&now).unwrap();

    assert_eq!(resolution.next_run(), scheduled);
    assert_eq!(cycle.into_store().get(keys::NEXT_RUN).unwrap(), Some(scheduled.to_value()));
}

#[test]
fn test_candidates_preselect_last_item() {
    let api = Arc::new(FakeApi::with_items(vec![
        WorkItem::new(1, "One"),
        WorkItem::new(2, "Two"),
    ]));
    let mut cycle = PromptCycle::new(MemoryStore::new(), api);
    let now = at(2026, 10, 19, 9, 0);

    assert_eq!(cycle.candidates().1, None);

    cycle.open_manually();
    cycle
        .register(Registration::new(WorkItem::new(2, "Two"), 1.0), &now)
        .unwrap();
    cycle.join_submissions();

    let (items, selected) = cycle.candidates();
    assert_eq!(items.len(), 2);
    assert_eq!(selected, Some(1));
}

#[test]
fn test_failed_store_write_still_tracks_submission() {
    let api = Arc::new(FakeApi::default().with_delay(StdDuration::from_millis(200)));
    let store = BrokenStore {
        fail_writes: true,
        ..BrokenStore::default()
    };
    let mut cycle = PromptCycle::new(store, api.clone());
    let now = at(2026, 10, 19, 12, 30);

    assert_eq!(cycle.tick(&now), TickOutcome::Due);
    let result = cycle.register(Registration::new(WorkItem::new(42, "Answer"), 2.0), &now);

    assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    assert_eq!(cycle.state(), PromptState::Idle);
    assert_eq!(cycle.pending_submissions(), 1);

    assert_eq!(cycle.join_submissions(), 0);
    assert_eq!(cycle.pending_submissions(), 0);
    assert_eq!(api.submissions(), vec![(42, 2.0)]);
}

#[test]
fn test_failed_history_write_does_not_prompt_again() {
    // next_run goes through, the history write is refused
    let store = BrokenStore {
        write_budget: Some(1),
        ..BrokenStore::default()
    };
    let api = Arc::new(FakeApi::default());
    let mut cycle = PromptCycle::new(store, api.clone());
    let now = at(2026, 10, 19, 12, 30);

    assert_eq!(cycle.tick(&now), TickOutcome::Due);
    let result = cycle.register(Registration::new(WorkItem::new(7, "Seven"), 1.0), &now);
    cycle.join_submissions();

    assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    assert_eq!(api.submissions(), vec![(7, 1.0)]);
    assert_eq!(cycle.tick(&now), TickOutcome::NotDue);

    let store = cycle.into_store();
    assert_eq!(
        store.inner.get(keys::NEXT_RUN).unwrap(),
        Some(NextRun::at(&at(2026, 10, 19, 14, 0)).to_value())
    );
    assert_eq!(store.inner.get(keys::REGISTRATION_HISTORY).unwrap(), None);
    assert_eq!(store.inner.get(keys::LAST_REGISTRATION_ISSUE_NUMBER).unwrap(), None);
}
