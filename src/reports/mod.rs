//! Reports module for the timesheet tracker
//!
//! Filters entries and totals hours by project and by month.

pub mod summary;

pub use summary::{
    round_hours, sort_for_display, EntryFilter, MonthTotal, ProjectTotal, TimesheetReport,
};
