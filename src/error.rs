//! Unified error handling for the hospital directory
//!
//! This module provides a single `Error` enum shared by the storage layer and
//! the HTTP handlers, plus the field-level [`ValidationError`] produced when a
//! request body does not satisfy the record schema.
//!
//! # Architecture
//!
//! - [`DirectoryErrorTrait`] - Common interface implemented by the error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum
//!
//! The mapping from [`ErrorCategory`] to HTTP status codes lives in
//! [`crate::api::error`].

use std::io;
use thiserror::Error;

/// Common trait for hospital directory error types
pub trait DirectoryErrorTrait: std::error::Error {
    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Request data failed schema validation
    Validation,
    /// The addressed record does not exist
    NotFound,
    /// The write would violate a uniqueness rule
    Conflict,
    /// Storage and I/O errors
    Storage,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Whether the category describes a problem with the caller's request
    /// rather than with the service itself
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation | Self::NotFound | Self::Conflict)
    }
}

/// A record field failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed for '{field}': {message}")]
pub struct ValidationError {
    /// Wire name of the offending field (e.g. `name`, `numberOfDoctors`)
    pub field: String,

    /// Human readable reason
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Unified error type for the hospital directory
#[derive(Error, Debug)]
pub enum Error {
    /// Field validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Record lookup came back empty
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    /// Uniqueness rule violated
    #[error("{0}")]
    Conflict(String),

    /// SQLite errors
    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// Non-SQL storage failures (poisoned locks, corrupt rows)
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

}

impl DirectoryErrorTrait for Error {
    fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Conflict(_) => ErrorCategory::Conflict,
            Self::Database(_) | Self::Storage(_) | Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a not-found error for the given entity
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a validation error for a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(field, message))
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

// Conversion from rusqlite::Error
impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err)
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
