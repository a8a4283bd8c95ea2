//! Core data models for the timesheet tracker

pub mod entry;
pub mod ids;

pub use entry::{parse_entry_date, EntryValidationError, TimesheetEntry};
pub use ids::EntryId;
