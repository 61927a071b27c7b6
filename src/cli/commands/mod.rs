pub mod cancel;
pub mod config;
pub mod due;
pub mod history;
pub mod init;
pub mod items;
pub mod register;
pub mod schedule;
pub mod snooze;
pub mod status;
pub mod watch;

use crate::api::{TargetProcessClient, WorkItemApi};
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::JsonFileStore;
use std::sync::Arc;

pub(crate) fn open_store(cfg: &Config) -> AppResult<JsonFileStore> {
    JsonFileStore::open(cfg.store_path())
}

pub(crate) fn api_client(cfg: &Config) -> Arc<dyn WorkItemApi> {
    Arc::new(TargetProcessClient::from_config(cfg))
}
