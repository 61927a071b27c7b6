pub mod due;
pub mod history;
pub mod prompt;
pub mod scheduler;
pub mod submit;

pub use due::{due_now, is_due};
pub use history::record;
pub use prompt::{PromptCycle, PromptState, Resolution, TickOutcome};
pub use scheduler::{SnoozeDuration, reschedule, schedule_next, snooze, snooze_and_persist};
