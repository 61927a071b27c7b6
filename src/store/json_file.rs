//! JSON file backend for the state store.

use crate::errors::{AppError, AppResult};
use crate::store::KeyValueStore;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A JSON object on disk, loaded once and rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file yields an empty store. A file that cannot be decoded is
    /// treated the same way (and logged), so a damaged state file never keeps
    /// the reminder from prompting.
    pub fn open<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    warn!(path = %path.display(), "state store is not a JSON object, starting empty");
                    Map::new()
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cannot decode state store, starting empty");
                    Map::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "state store not found, starting empty");
                Map::new()
            }
            Err(e) => {
                return Err(AppError::StoreUnavailable(format!(
                    "cannot read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable<E: std::fmt::Display>(&self, e: E) -> AppError {
        AppError::StoreUnavailable(format!("{}: {}", self.path.display(), e))
    }

    fn write(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.unavailable(e))?;
        }

        let content = serde_json::to_string_pretty(&self.values).map_err(|e| self.unavailable(e))?;
        fs::write(&self.path, content).map_err(|e| self.unavailable(e))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> AppResult<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> AppResult<()> {
        let previous = self.values.insert(key.to_string(), value);

        if let Err(e) = self.write() {
            // keep memory and disk in agreement
            match previous {
                Some(v) => self.values.insert(key.to_string(), v),
                None => self.values.remove(key),
            };
            return Err(e);
        }

        Ok(())
    }

    /// All entries land in one file write; on failure none of them stick.
    fn set_many(&mut self, entries: Vec<(&str, Value)>) -> AppResult<()> {
        let snapshot = self.values.clone();
        for (key, value) in entries {
            self.values.insert(key.to_string(), value);
        }

        if let Err(e) = self.write() {
            self.values = snapshot;
            return Err(e);
        }

        Ok(())
    }
}
