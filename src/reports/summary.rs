//! Timesheet Summary Report
//!
//! Filters entries, orders them for display (newest first), and totals the
//! hours overall, per project and per calendar month.

use std::collections::BTreeMap;
use std::io::Write;

use chrono::NaiveDate;

use crate::display::report::{format_bar, format_hours, truncate};
use crate::error::{TimesheetError, TimesheetResult};
use crate::models::TimesheetEntry;
use crate::storage::Storage;

/// Filter options for listing and reporting
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Earliest date to include (inclusive)
    pub start_date: Option<NaiveDate>,
    /// Latest date to include (inclusive)
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive substring of the project name
    pub project_contains: Option<String>,
}

impl EntryFilter {
    /// Check if an entry matches this filter
    ///
    /// Entries whose date text can't be interpreted never match a date bound.
    pub fn matches(&self, entry: &TimesheetEntry) -> bool {
        if self.start_date.is_some() || self.end_date.is_some() {
            let Some(date) = entry.parsed_date() else {
                return false;
            };
            if self.start_date.is_some_and(|start| date < start) {
                return false;
            }
            if self.end_date.is_some_and(|end| date > end) {
                return false;
            }
        }

        if let Some(keyword) = &self.project_contains {
            let keyword = keyword.trim().to_lowercase();
            if !keyword.is_empty() && !entry.project.to_lowercase().contains(&keyword) {
                return false;
            }
        }

        true
    }

    /// Matching entries, in display order
    pub fn apply(&self, entries: &[TimesheetEntry]) -> Vec<TimesheetEntry> {
        let mut matched: Vec<_> = entries.iter().filter(|e| self.matches(e)).cloned().collect();
        sort_for_display(&mut matched);
        matched
    }
}

/// Sort newest first; undated entries go last, ties keep storage order
pub fn sort_for_display(entries: &mut [TimesheetEntry]) {
    entries.sort_by(|a, b| b.parsed_date().cmp(&a.parsed_date()));
}

/// Round hours to two decimals for display
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Hours booked against one project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectTotal {
    pub project: String,
    pub hours: f64,
}

/// Hours booked in one calendar month
#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    /// `YYYY-MM`
    pub month: String,
    pub hours: f64,
}

/// Timesheet Summary Report
#[derive(Debug, Clone)]
pub struct TimesheetReport {
    /// Matching entries, newest first
    pub entries: Vec<TimesheetEntry>,
    /// Total hours across matching entries
    pub total_hours: f64,
    /// Hours per project, in order of first appearance
    pub by_project: Vec<ProjectTotal>,
    /// Hours per month, oldest month first
    pub by_month: Vec<MonthTotal>,
    /// Filter applied
    pub filter: EntryFilter,
}

impl TimesheetReport {
    /// Generate a report from the store
    pub fn generate(storage: &Storage, filter: EntryFilter) -> TimesheetResult<Self> {
        let entries = storage.entries.get_all()?;
        Ok(Self::from_entries(&entries, filter))
    }

    /// Build a report from an entry sequence
    pub fn from_entries(entries: &[TimesheetEntry], filter: EntryFilter) -> Self {
        let entries = filter.apply(entries);

        let mut by_project: Vec<ProjectTotal> = Vec::new();
        let mut by_month: BTreeMap<String, f64> = BTreeMap::new();
        let mut total_hours = 0.0;

        for entry in &entries {
            total_hours += entry.hours;

            match by_project.iter_mut().find(|p| p.project == entry.project) {
                Some(total) => total.hours += entry.hours,
                None => by_project.push(ProjectTotal {
                    project: entry.project.clone(),
                    hours: entry.hours,
                }),
            }

            if let Some(month) = entry.month_label() {
                *by_month.entry(month).or_insert(0.0) += entry.hours;
            }
        }

        for total in &mut by_project {
            total.hours = round_hours(total.hours);
        }

        Self {
            entries,
            total_hours: round_hours(total_hours),
            by_project,
            by_month: by_month
                .into_iter()
                .map(|(month, hours)| MonthTotal {
                    month,
                    hours: round_hours(hours),
                })
                .collect(),
            filter,
        }
    }

    /// Number of matching entries
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// One-line summary ("12 entries, 37.5 hours")
    pub fn summary_line(&self) -> String {
        format!(
            "{} entries, {} hours",
            self.entry_count(),
            self.total_hours
        )
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Timesheet Report");
        if let Some(scope) = self.scope_label() {
            output.push_str(&format!(": {}", scope));
        }
        output.push('\n');
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!("Entries:     {}\n", self.entry_count()));
        output.push_str(&format!("Total Hours: {}\n", format_hours(self.total_hours)));

        if self.entries.is_empty() {
            output.push_str("\nNo entries match.\n");
            return output;
        }

        let max_project = self
            .by_project
            .iter()
            .map(|p| p.hours)
            .fold(0.0_f64, f64::max);

        output.push_str(&format!("\n{:<30} {:>10}\n", "Project", "Hours"));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        for total in &self.by_project {
            output.push_str(&format!(
                "{:<30} {:>10}  {}\n",
                truncate(&total.project, 30),
                format_hours(total.hours),
                format_bar(total.hours, max_project, 16)
            ));
        }

        if !self.by_month.is_empty() {
            let max_month = self
                .by_month
                .iter()
                .map(|m| m.hours)
                .fold(0.0_f64, f64::max);

            output.push_str(&format!("\n{:<30} {:>10}\n", "Month", "Hours"));
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for total in &self.by_month {
                output.push_str(&format!(
                    "{:<30} {:>10}  {}\n",
                    total.month,
                    format_hours(total.hours),
                    format_bar(total.hours, max_month, 16)
                ));
            }
        }

        output
    }

    /// Human description of the filter, if any
    fn scope_label(&self) -> Option<String> {
        let mut parts = Vec::new();
        match (self.filter.start_date, self.filter.end_date) {
            (Some(start), Some(end)) => parts.push(format!("{} to {}", start, end)),
            (Some(start), None) => parts.push(format!("from {}", start)),
            (None, Some(end)) => parts.push(format!("until {}", end)),
            (None, None) => {}
        }
        if let Some(keyword) = self.filter.project_contains.as_deref() {
            if !keyword.trim().is_empty() {
                parts.push(format!("project ~ \"{}\"", keyword.trim()));
            }
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }

    /// Export the aggregates as CSV (`group,label,hours`)
    pub fn export_csv<W: Write>(&self, writer: W) -> TimesheetResult<()> {
        let mut csv_writer = ::csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["group", "label", "hours"])
            .map_err(|e| TimesheetError::Export(e.to_string()))?;

        for total in &self.by_project {
            csv_writer
                .write_record(["project", total.project.as_str(), &total.hours.to_string()])
                .map_err(|e| TimesheetError::Export(e.to_string()))?;
        }

        for total in &self.by_month {
            csv_writer
                .write_record(["month", total.month.as_str(), &total.hours.to_string()])
                .map_err(|e| TimesheetError::Export(e.to_string()))?;
        }

        csv_writer
            .write_record(["total", "", &self.total_hours.to_string()])
            .map_err(|e| TimesheetError::Export(e.to_string()))?;

        csv_writer
            .flush()
            .map_err(|e| TimesheetError::Export(e.to_string()))?;

        Ok(())
    }
}
