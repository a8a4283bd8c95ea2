//! Error types for the timesheet tracker
//!
//! One enum covers every failure a command can report. Corrupt persisted
//! state has its own variant because the store recovers from it instead of
//! surfacing it.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::EntryValidationError;

#[derive(Error, Debug)]
pub enum TimesheetError {
    /// Settings file or platform directories unusable
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected user input; raised before the store is touched
    #[error("Validation error: {0}")]
    Validation(String),

    /// No entry matches the given full or short id
    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    /// The entry document exists but is not a JSON array of entries
    #[error("Stored entries in {} are unreadable: {reason}", .path.display())]
    CorruptStore { path: PathBuf, reason: String },

    /// A CSV file could not be read at all
    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),

    /// Reading or writing the entry document failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TimesheetError {
    pub fn entry_not_found(identifier: impl Into<String>) -> Self {
        Self::EntryNotFound(identifier.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::EntryNotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// True when the persisted document could not be parsed
    pub fn is_corrupt_store(&self) -> bool {
        matches!(self, Self::CorruptStore { .. })
    }
}

impl From<EntryValidationError> for TimesheetError {
    fn from(err: EntryValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<std::io::Error> for TimesheetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TimesheetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

pub type TimesheetResult<T> = Result<T, TimesheetError>;
