//! Names of the parameters kept in the state store.

pub const NEXT_RUN: &str = "next_run";

pub const SCHEDULE_TYPE: &str = "schedule_type";
pub const SCHEDULE_LIST: &str = "schedule_list";
pub const INTERVAL_HOURS: &str = "interval_hours";
pub const INTERVAL_MINUTES: &str = "interval_minutes";

pub const REGISTRATION_HISTORY: &str = "registration_history";

pub const LAST_REGISTRATION_ISSUE_NUMBER: &str = "last_registration_issue_number";
pub const LAST_REGISTRATION_TIME_SPENT: &str = "last_registration_time_spent";
pub const LAST_REGISTRATION_DATETIME: &str = "last_registration_datetime";
