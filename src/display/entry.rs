//! Entry display formatting
//!
//! Formats timesheet entries for terminal output in table and detail views.

use crate::models::TimesheetEntry;

use super::report::{format_hours, truncate};

const NOTE_WIDTH: usize = 40;

/// Render an entry's date with the configured strftime format
///
/// Date text that can't be interpreted is shown as stored.
pub fn format_entry_date(entry: &TimesheetEntry, date_format: &str) -> String {
    match entry.parsed_date() {
        Some(date) => date.format(date_format).to_string(),
        None => entry.date.clone(),
    }
}

/// Format a list of entries as a table, rows in the order given
pub fn format_entry_list(entries: &[TimesheetEntry], date_format: &str) -> String {
    if entries.is_empty() {
        return "No entries found.".to_string();
    }

    let dates: Vec<String> = entries
        .iter()
        .map(|e| format_entry_date(e, date_format))
        .collect();

    let date_width = dates
        .iter()
        .map(|d| d.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let project_width = entries
        .iter()
        .map(|e| e.project.chars().count())
        .max()
        .unwrap_or(7)
        .clamp(7, 30);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<date_width$}  {:<project_width$}  {:>8}  {}\n",
        "ID",
        "Date",
        "Project",
        "Hours",
        "Note",
        date_width = date_width,
        project_width = project_width,
    ));

    output.push_str(&format!(
        "{:-<12}  {:-<date_width$}  {:-<project_width$}  {:->8}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        date_width = date_width,
        project_width = project_width,
    ));

    for (entry, date) in entries.iter().zip(&dates) {
        output.push_str(&format!(
            "{:<12}  {:<date_width$}  {:<project_width$}  {:>8}  {}\n",
            entry.id.to_string(),
            date,
            truncate(&entry.project, project_width),
            format_hours(entry.hours),
            truncate(&entry.note, NOTE_WIDTH),
            date_width = date_width,
            project_width = project_width,
        ));
    }

    let total: f64 = entries.iter().map(|e| e.hours).sum();
    output.push_str(&format!(
        "{:<12}  {:<date_width$}  {:<project_width$}  {:>8}\n",
        "TOTAL",
        "",
        "",
        format_hours(total),
        date_width = date_width,
        project_width = project_width,
    ));

    output
}

/// Format a single entry's details
pub fn format_entry_details(entry: &TimesheetEntry, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Entry: {}\n", entry.id));
    output.push_str(&format!("  Date:    {}\n", format_entry_date(entry, date_format)));
    output.push_str(&format!("  Project: {}\n", entry.project));
    output.push_str(&format!("  Hours:   {}\n", format_hours(entry.hours)));
    if !entry.note.is_empty() {
        output.push_str(&format!("  Note:    {}\n", entry.note));
    }

    output
}
