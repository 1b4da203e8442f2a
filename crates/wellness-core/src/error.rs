//! Core error types for wellness-core.
//!
//! This module defines the error hierarchy using thiserror so that every
//! fallible operation in the library reports through one family of types.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for wellness-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Reminder scheduling errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the preferences database
    #[error("Failed to open preferences at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Schema migration failed
    #[error("Preferences migration failed: {0}")]
    MigrationFailed(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::QueryFailed(e.to_string())
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Reminder scheduling errors.
///
/// Scheduling failures are never fatal: callers log them and surface a
/// transient message. Retry is left to the scheduler's own policy.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The external scheduler rejected the periodic work definition
    #[error("Scheduler rejected work '{work_id}': {message}")]
    Rejected { work_id: String, message: String },

    /// A reminder time window could not be parsed
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTime { value: String },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required field was empty
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    /// A numeric field was out of range
    #[error("Value for '{field}' out of range: {message}")]
    OutOfRange { field: &'static str, message: String },
}
