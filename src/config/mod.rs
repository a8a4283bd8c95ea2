//! Configuration module for the timesheet tracker
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::{TimesheetPaths, STORAGE_KEY};
pub use settings::Settings;
