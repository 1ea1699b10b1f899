//! Core error types for focusfoe-core.
//!
//! Contract violations propagate to the caller; nothing in the engine
//! retries or swallows an error.

use std::path::PathBuf;
use thiserror::Error;

use crate::flow::{FlowAction, FlowState};

/// Core error type for focusfoe-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors (caller misuse)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Flow transition errors
    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

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

/// Validation errors.
///
/// Every variant names the offending value and its valid range so callers
/// can surface the message directly.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Value must be strictly positive
    #[error("Invalid value for '{field}': must be greater than 0, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    /// Value must be non-negative
    #[error("Invalid value for '{field}': must be >= 0, got {value}")]
    Negative { field: &'static str, value: f64 },

    /// Value fell outside its documented range
    #[error("Invalid value for '{field}': {value} is outside the valid range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Flow transition errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The action is not defined for the current state
    #[error("No transition defined from state '{state:?}' for action '{action:?}'")]
    InvalidTransition {
        state: FlowState,
        action: FlowAction,
    },
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

    /// Failed to resolve the configuration directory
    #[error("Failed to resolve configuration directory: {0}")]
    DirUnavailable(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
