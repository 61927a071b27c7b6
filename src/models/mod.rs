pub mod next_run;
pub mod registration;
pub mod schedule;
pub mod work_item;

pub use next_run::NextRun;
pub use registration::{LastRegistration, Registration, RegistrationHistoryEntry};
pub use schedule::{ScheduleConfig, TimeOfDay};
pub use work_item::WorkItem;
