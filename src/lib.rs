//! Timesheet - a command-line timesheet tracker
//!
//! This library provides the core functionality for logging hours against
//! projects, persisting them as JSON, exchanging them as CSV, and summarizing
//! them by project and by month.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: The timesheet entry model and its identifiers
//! - `codec`: CSV encoding and decoding of entries
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer (entries, edit session, import)
//! - `audit`: Audit logging system
//! - `export`: CSV export of the store
//! - `reports`: Filtering and hour totals
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use timesheet::config::{paths::TimesheetPaths, settings::Settings};
//! use timesheet::services::{EntryInput, EntryService};
//! use timesheet::storage::Storage;
//!
//! let paths = TimesheetPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all();
//!
//! EntryService::new(&storage).create(EntryInput::new("2024-01-05", "Acme", 3.5, ""))?;
//! ```

pub mod audit;
pub mod cli;
pub mod codec;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::TimesheetError;
