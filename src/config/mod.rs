use crate::constants::{
    APPLICATION_NAME, DEFAULT_TICK_SECONDS, DEFAULT_TP_TAKE, DEFAULT_TP_TEAM_NAME, DEFAULT_TP_URL,
};
use crate::errors::{AppError, AppResult};
use crate::store::JsonFileStore;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application settings, kept as YAML next to the state store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_store")]
    pub store: String,
    #[serde(default = "default_tp_url")]
    pub tp_url: String,
    #[serde(default = "default_tp_team_name")]
    pub tp_team_name: String,
    #[serde(default = "default_tp_take")]
    pub tp_take: u32,
    #[serde(default)]
    pub tp_access_token: String,
    #[serde(default)]
    pub tp_userid: Option<u64>,
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_store() -> String {
    Config::store_file().to_string_lossy().to_string()
}
fn default_tp_url() -> String {
    DEFAULT_TP_URL.to_string()
}
fn default_tp_team_name() -> String {
    DEFAULT_TP_TEAM_NAME.to_string()
}
fn default_tp_take() -> u32 {
    DEFAULT_TP_TAKE
}
fn default_tick_seconds() -> u64 {
    DEFAULT_TICK_SECONDS
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: default_store(),
            tp_url: default_tp_url(),
            tp_team_name: default_tp_team_name(),
            tp_take: default_tp_take(),
            tp_access_token: String::new(),
            tp_userid: None,
            tick_seconds: default_tick_seconds(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APPLICATION_NAME)
    }

    /// Return the full path of the settings file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("zup.conf")
    }

    /// Return the full path of the JSON state store
    pub fn store_file() -> PathBuf {
        Self::config_dir().join("state.json")
    }

    pub fn store_path(&self) -> PathBuf {
        expand_tilde(&self.store)
    }

    /// Load settings from `path`, or return defaults if the file is missing
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|_| AppError::ConfigSave)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Same settings with the access token masked, for display.
    pub fn redacted(&self) -> Self {
        let mut shown = self.clone();
        if !shown.tp_access_token.is_empty() {
            shown.tp_access_token = "***".to_string();
        }
        shown
    }

    /// Initialize the settings file and the state store.
    ///
    /// An existing settings file is kept as is; in test mode it is never
    /// written. The store file is created empty when missing.
    pub fn init_all(&self, config_path: &Path, is_test: bool) -> AppResult<()> {
        if !is_test && !config_path.exists() {
            self.save_to(config_path)?;
        }

        let store_path = self.store_path();
        if !store_path.exists() {
            if let Some(parent) = store_path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(&store_path, "{}")?;
        }

        // make sure what we wrote is a readable store
        JsonFileStore::open(&store_path)?;
        Ok(())
    }
}
