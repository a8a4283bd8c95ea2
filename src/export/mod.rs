//! Export module for the timesheet tracker
//!
//! Provides CSV export of the entry store.

pub mod csv;

pub use self::csv::{default_export_file_name, export_entries_csv};
