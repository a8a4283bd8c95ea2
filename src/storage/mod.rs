//! Storage layer for the timesheet tracker
//!
//! Provides JSON file storage with atomic writes and the audit trail that
//! accompanies every mutation.

pub mod entries;
pub mod file_io;

pub use entries::EntryRepository;
pub use file_io::{read_document, write_document, StoredDocument};

use tracing::warn;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::TimesheetPaths;
use crate::error::TimesheetError;
use crate::models::TimesheetEntry;

/// Main storage coordinator
pub struct Storage {
    paths: TimesheetPaths,
    pub entries: EntryRepository,
    audit: AuditLogger,
    audit_enabled: bool,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: TimesheetPaths) -> Result<Self, TimesheetError> {
        paths.ensure_directories()?;

        Ok(Self {
            entries: EntryRepository::new(paths.entries_file()),
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: true,
            paths,
        })
    }

    pub fn paths(&self) -> &TimesheetPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Turn audit logging on or off (see `Settings::audit_enabled`)
    pub fn set_audit_enabled(&mut self, enabled: bool) {
        self.audit_enabled = enabled;
    }

    /// Load all data from disk; corrupt state degrades to an empty store
    pub fn load_all(&mut self) -> usize {
        self.entries.load()
    }

    /// Record a created entry in the audit log
    pub fn log_create(&self, entry: &TimesheetEntry) {
        self.log_creates(std::slice::from_ref(entry));
    }

    /// Record a batch of created entries (CSV import)
    pub fn log_creates(&self, entries: &[TimesheetEntry]) {
        let records: Vec<_> = entries
            .iter()
            .map(|e| AuditEntry::create(e.id.to_string(), Some(e.to_string()), e))
            .collect();
        self.append_audit(&records);
    }

    /// Record an edited entry in the audit log
    pub fn log_update(
        &self,
        before: &TimesheetEntry,
        after: &TimesheetEntry,
        diff_summary: Option<String>,
    ) {
        self.append_audit(&[AuditEntry::update(
            after.id.to_string(),
            Some(after.to_string()),
            before,
            after,
            diff_summary,
        )]);
    }

    /// Record deleted entries in the audit log
    pub fn log_deletes(&self, entries: &[TimesheetEntry]) {
        let records: Vec<_> = entries
            .iter()
            .map(|e| AuditEntry::delete(e.id.to_string(), Some(e.to_string()), e))
            .collect();
        self.append_audit(&records);
    }

    /// Audit records are written after the store is saved; a failure here
    /// is logged and never turns a persisted change into a failed command.
    fn append_audit(&self, records: &[AuditEntry]) {
        if !self.audit_enabled {
            return;
        }
        if let Err(e) = self.audit.log_batch(records) {
            warn!(
                error = %e,
                path = %self.audit.path().display(),
                records = records.len(),
                "failed to write audit log"
            );
        }
    }
}
