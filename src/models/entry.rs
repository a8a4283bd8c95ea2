//! Timesheet entry model
//!
//! A single logged block of work: the date it happened, the project it was
//! booked against, how many hours, and an optional note.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::EntryId;

/// Date layouts accepted when an entry's date text has to be interpreted
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d", "%b %d, %Y",
];

/// One timesheet record
///
/// `date` is kept as the text the user or the CSV file supplied; it is only
/// interpreted (see [`TimesheetEntry::parsed_date`]) for filtering, sorting
/// and grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetEntry {
    /// Stable identifier; documents written before ids existed get a fresh one
    #[serde(default)]
    pub id: EntryId,

    /// Work date, usually `YYYY-MM-DD`
    pub date: String,

    /// Project label
    pub project: String,

    /// Hours worked, always > 0 for a stored entry
    pub hours: f64,

    /// Free text, may be empty
    #[serde(default)]
    pub note: String,
}

impl TimesheetEntry {
    /// Create a new entry with a fresh id
    pub fn new(
        date: impl Into<String>,
        project: impl Into<String>,
        hours: f64,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            date: date.into(),
            project: project.into(),
            hours,
            note: note.into(),
        }
    }

    /// Validate the entry against the store invariants
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.date.trim().is_empty() {
            return Err(EntryValidationError::EmptyDate);
        }

        if self.project.trim().is_empty() {
            return Err(EntryValidationError::EmptyProject);
        }

        if !self.hours.is_finite() || self.hours <= 0.0 {
            return Err(EntryValidationError::NonPositiveHours(self.hours));
        }

        Ok(())
    }

    /// Reject line breaks in the text fields
    ///
    /// CSV decoding is line-based, so a line break inside a field would not
    /// survive an export followed by an import.
    pub fn check_single_line(&self) -> Result<(), EntryValidationError> {
        let fields = [("date", &self.date), ("project", &self.project), ("note", &self.note)];
        match fields
            .into_iter()
            .find(|(_, value)| value.contains(['\n', '\r']))
        {
            Some((field, _)) => Err(EntryValidationError::LineBreak(field)),
            None => Ok(()),
        }
    }

    /// Check whether the entry satisfies the store invariants
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Interpret the date text as a calendar date, if possible
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_entry_date(&self.date)
    }

    /// Calendar month of the entry as `YYYY-MM`
    pub fn month_label(&self) -> Option<String> {
        self.parsed_date().map(|d| d.format("%Y-%m").to_string())
    }

    /// Check whether this entry carries the same data as another,
    /// ignoring the id
    pub fn same_content(&self, other: &TimesheetEntry) -> bool {
        self.date == other.date
            && self.project == other.project
            && self.hours == other.hours
            && self.note == other.note
    }
}

impl fmt::Display for TimesheetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}h", self.date, self.project, self.hours)
    }
}

/// Parse a date string using several common layouts
///
/// ISO timestamps (`2024-03-01T09:30:00`) are reduced to their date part.
pub fn parse_entry_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    // 2024-03-01T09:30:00Z and friends
    s.get(..10)
        .filter(|_| s.as_bytes().get(10).is_some_and(|b| *b == b'T' || *b == b' '))
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

/// Validation errors for timesheet entries
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidationError {
    EmptyDate,
    EmptyProject,
    NonPositiveHours(f64),
    LineBreak(&'static str),
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDate => write!(f, "Date cannot be empty"),
            Self::EmptyProject => write!(f, "Project cannot be empty"),
            Self::NonPositiveHours(hours) => {
                write!(f, "Hours must be a number greater than 0 (got {})", hours)
            }
            Self::LineBreak(field) => write!(f, "The {} must fit on one line", field),
        }
    }
}

impl std::error::Error for EntryValidationError {}
