//! Remote work-item service.

pub mod targetprocess;

pub use targetprocess::TargetProcessClient;

use crate::errors::AppResult;
use crate::models::WorkItem;

pub trait WorkItemApi: Send + Sync {
    /// Work items the user may log time against. Never fails: any problem
    /// talking to the service yields an empty list.
    fn list_candidate_items(&self) -> Vec<WorkItem>;

    /// Record `hours` spent on `item_id`.
    fn submit_time(&self, item_id: u64, hours: f64) -> AppResult<()>;
}
