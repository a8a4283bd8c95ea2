//! Display formatting for terminal output
//!
//! Provides utilities for formatting entries and reports as plain-text
//! tables.

pub mod entry;
pub mod report;

pub use entry::{format_entry_date, format_entry_details, format_entry_list};
