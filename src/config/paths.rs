//! Path management for the timesheet tracker
//!
//! ## Path Resolution Order
//!
//! 1. `TIMESHEET_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/timesheet-cli` on Linux,
//!    `%APPDATA%\timesheet-cli` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::TimesheetError;

/// Fixed storage key under which the entry document is persisted
pub const STORAGE_KEY: &str = "timesheet_entries_v1";

/// Manages all paths used by the timesheet tracker
#[derive(Debug, Clone)]
pub struct TimesheetPaths {
    base_dir: PathBuf,
}

impl TimesheetPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, TimesheetError> {
        let base_dir = if let Ok(custom) = std::env::var("TIMESHEET_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the persisted entry document
    pub fn entries_file(&self) -> PathBuf {
        self.data_dir().join(format!("{}.json", STORAGE_KEY))
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), TimesheetError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| TimesheetError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| TimesheetError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, TimesheetError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| TimesheetError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("timesheet-cli"))
}
