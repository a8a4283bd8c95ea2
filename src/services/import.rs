//! CSV import service
//!
//! Reads a CSV file, decodes it, and appends the accepted rows to the store
//! in file order.

use std::path::Path;

use tracing::{info, warn};

use crate::codec::from_csv;
use crate::error::{TimesheetError, TimesheetResult};
use crate::storage::Storage;

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Number of entries appended to the store
    pub imported: usize,
}

impl ImportResult {
    /// True when the document held no usable rows
    pub fn is_empty(&self) -> bool {
        self.imported == 0
    }
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import a CSV file from disk
    ///
    /// Unreadable files and non-UTF-8 content fail with an import error.
    /// Rows that don't decode into valid entries are skipped silently.
    pub fn import_file(&self, path: &Path) -> TimesheetResult<ImportResult> {
        let bytes = std::fs::read(path).map_err(|e| {
            TimesheetError::Import(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let text = String::from_utf8(bytes).map_err(|e| {
            warn!(path = %path.display(), error = %e, "import file is not UTF-8 text");
            TimesheetError::Import(format!("{} is not a UTF-8 text file", path.display()))
        })?;

        self.import_str(&text)
    }

    /// Import CSV text
    ///
    /// When no row is usable the store is left untouched.
    pub fn import_str(&self, text: &str) -> TimesheetResult<ImportResult> {
        // Spreadsheet exports often start with a byte order mark
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let entries = from_csv(text);
        if entries.is_empty() {
            info!("import contained no usable rows");
            return Ok(ImportResult::default());
        }

        let imported = entries.len();

        self.storage.entries.extend(entries.clone())?;
        self.storage.entries.save()?;
        self.storage.log_creates(&entries);

        info!(count = imported, "imported entries from CSV");
        Ok(ImportResult { imported })
    }
}
