#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, FixedOffset, TimeZone};
use serde_json::Value;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;
use zup::api::WorkItemApi;
use zup::errors::{AppError, AppResult};
use zup::models::WorkItem;
use zup::store::{KeyValueStore, MemoryStore};

pub fn zup() -> Command {
    cargo_bin_cmd!("zup")
}

/// Create a unique test store path inside the system temp dir and remove any existing file
pub fn setup_test_store(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_zup_state.json", name));
    let store_path = path.to_string_lossy().to_string();
    fs::remove_file(&store_path).ok();
    store_path
}

/// Write a settings file whose service URL refuses connections
pub fn setup_test_config(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_zup.conf", name));
    let config_path = path.to_string_lossy().to_string();
    fs::write(
        &config_path,
        "tp_url: \"http://127.0.0.1:9/\"\ntp_access_token: \"secret\"\nlog_level: \"error\"\n",
    )
    .expect("write test config");
    config_path
}

pub fn read_store(path: &str) -> Value {
    let content = fs::read_to_string(path).expect("read store");
    serde_json::from_str(&content).expect("store is JSON")
}

/// Central European summer time, so offsets show up in serialized values.
pub fn tz() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).expect("valid offset")
}

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    tz().with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid test timestamp")
}

/// In-process stand-in for the work-item service.
#[derive(Default)]
pub struct FakeApi {
    pub items: Vec<WorkItem>,
    pub fail_submissions: bool,
    pub delay: Duration,
    pub submitted: Mutex<Vec<(u64, f64)>>,
}

impl FakeApi {
    pub fn with_items(items: Vec<WorkItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_submissions: true,
            ..Self::default()
        }
    }

    /// Make every submission take `delay` before it answers.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn submissions(&self) -> Vec<(u64, f64)> {
        self.submitted.lock().expect("lock").clone()
    }
}

impl WorkItemApi for FakeApi {
    fn list_candidate_items(&self) -> Vec<WorkItem> {
        self.items.clone()
    }

    fn submit_time(&self, item_id: u64, hours: f64) -> AppResult<()> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        if self.fail_submissions {
            return Err(AppError::Http("status code 500".into()));
        }
        self.submitted.lock().expect("lock").push((item_id, hours));
        Ok(())
    }
}

/// Store whose reads and/or writes fail. With `write_budget` set, writes
/// succeed until the budget is spent.
#[derive(Default)]
pub struct BrokenStore {
    pub inner: MemoryStore,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub write_budget: Option<usize>,
}

impl KeyValueStore for BrokenStore {
    fn get(&self, key: &str) -> AppResult<Option<Value>> {
        if self.fail_reads {
            return Err(AppError::StoreUnavailable("read refused".into()));
        }
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> AppResult<()> {
        if self.fail_writes || self.write_budget == Some(0) {
            return Err(AppError::StoreUnavailable("write refused".into()));
        }
        if let Some(budget) = self.write_budget.as_mut() {
            *budget -= 1;
        }
        self.inner.set(key, value)
    }
}
