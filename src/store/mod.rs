//! Key-value state store.
//!
//! Every piece of persisted state (next run, schedule, registration history)
//! lives here as a loosely typed JSON value. Core functions receive the store
//! explicitly, so they can run against [`MemoryStore`] in tests and against
//! [`JsonFileStore`] in the application.

pub mod json_file;
pub mod keys;

pub use json_file::JsonFileStore;

use crate::errors::AppResult;
use serde_json::{Map, Value};

pub trait KeyValueStore {
    /// Read a parameter. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> AppResult<Option<Value>>;

    /// Write a parameter and make it durable.
    fn set(&mut self, key: &str, value: Value) -> AppResult<()>;

    /// Write several parameters together.
    ///
    /// The default writes them one by one, so a failure can leave the first
    /// ones applied. Backends that can commit atomically override it.
    fn set_many(&mut self, entries: Vec<(&str, Value)>) -> AppResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Read a parameter, falling back to `default` when it is absent.
    fn get_or(&self, key: &str, default: Value) -> AppResult<Value> {
        Ok(self.get(key)?.unwrap_or(default))
    }
}

/// Store kept entirely in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: Map<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> AppResult<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
