//! Background submission of registrations.
//!
//! The prompt closes as soon as the user registers; the HTTP call runs on its
//! own thread. A failed submission is logged and otherwise dropped. Callers
//! that want to react (retry, notify) pass a completion callback.

use crate::api::WorkItemApi;
use crate::errors::AppResult;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

pub type CompletionCallback = Box<dyn FnOnce(&AppResult<()>) + Send + 'static>;

pub fn dispatch_submission(
    api: Arc<dyn WorkItemApi>,
    item_id: u64,
    hours: f64,
    on_complete: Option<CompletionCallback>,
) -> AppResult<JoinHandle<()>> {
    let handle = thread::Builder::new()
        .name("zup-submit".into())
        .spawn(move || {
            let result = api.submit_time(item_id, hours);

            match &result {
                Ok(()) => debug!(item_id, hours, "registration submitted"),
                Err(e) => warn!(item_id, hours, error = %e, "registration submission failed"),
            }

            if let Some(callback) = on_complete {
                callback(&result);
            }
        })?;

    Ok(handle)
}
