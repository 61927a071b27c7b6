//! Unified application error type.
//! All modules (store, api, core, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Validation errors
    // ---------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Collaborators
    // ---------------------------
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("HTTP error: {0}")]
    Http(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Prompt lifecycle
    // ---------------------------
    #[error("No prompt is open")]
    NoPrompt,
}

pub type AppResult<T> = Result<T, AppError>;
