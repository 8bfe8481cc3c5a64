//! Core error types for dayfill-core.
//!
//! One thiserror enum per concern (scheduling, task sources, task sinks,
//! configuration), aggregated by [`CoreError`].

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayfill-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Scheduling errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Task source errors
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Task sink errors
    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a scheduling run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A task with a non-positive or oversized duration was handed to the scheduler.
    #[error("Invalid duration for task '{task}': {minutes} minutes (expected 1 to {})", crate::task::MAX_TASK_DURATION)]
    InvalidTaskDuration { task: String, minutes: i64 },

    /// The scheduler walked past its look-ahead horizon without placing a task.
    #[error("No slot for task '{task}' within {horizon_days} days of {start_day}")]
    HorizonExhausted {
        task: String,
        start_day: NaiveDate,
        horizon_days: u32,
    },
}

/// Errors raised by a [`TaskSource`](crate::integrations::TaskSource).
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source could not produce data for a day.
    #[error("Task source unavailable for {date}: {message}")]
    Unavailable { date: NaiveDate, message: String },

    /// Failed to read the backing store
    #[error("Failed to read tasks from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing store is malformed
    #[error("Failed to parse tasks: {0}")]
    Parse(String),
}

/// Errors raised by a [`TaskSink`](crate::integrations::TaskSink).
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to write schedule: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode schedule: {0}")]
    Encode(#[from] serde_json::Error),
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

    /// Key does not exist in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
