//! CSV Export functionality
//!
//! Writes the whole entry store, in storage order, as a CSV document that
//! `import` reads back.

use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;

use crate::codec::to_csv;
use crate::error::{TimesheetError, TimesheetResult};
use crate::storage::Storage;

/// Export all entries to CSV; returns the number of entries written
pub fn export_entries_csv<W: Write>(storage: &Storage, writer: &mut W) -> TimesheetResult<usize> {
    let entries = storage.entries.get_all()?;

    writer
        .write_all(to_csv(&entries).as_bytes())
        .map_err(|e| TimesheetError::Export(e.to_string()))?;
    writer
        .flush()
        .map_err(|e| TimesheetError::Export(e.to_string()))?;

    Ok(entries.len())
}

/// File name used when no output path is given (`<prefix>_<unix-millis>.csv`)
pub fn default_export_file_name(prefix: &str) -> PathBuf {
    PathBuf::from(format!("{}_{}.csv", prefix, Utc::now().timestamp_millis()))
}
