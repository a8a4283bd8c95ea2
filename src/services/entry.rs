//! Entry service
//!
//! Business logic for timesheet entries: input validation, persistence after
//! every mutation, and audit logging.

use tracing::info;

use crate::audit::diff_serialized;
use crate::error::{TimesheetError, TimesheetResult};
use crate::models::{EntryId, TimesheetEntry};
use crate::storage::Storage;

/// Raw values for a new or edited entry, as typed by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryInput {
    pub date: String,
    pub project: String,
    pub hours: f64,
    pub note: String,
}

impl EntryInput {
    pub fn new(
        date: impl Into<String>,
        project: impl Into<String>,
        hours: f64,
        note: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            project: project.into(),
            hours,
            note: note.into(),
        }
    }

    /// Prefill input from an existing entry (edit form)
    pub fn from_entry(entry: &TimesheetEntry) -> Self {
        Self::new(
            entry.date.clone(),
            entry.project.clone(),
            entry.hours,
            entry.note.clone(),
        )
    }

    /// Build a validated entry carrying `id`
    fn into_entry(self, id: EntryId) -> TimesheetResult<TimesheetEntry> {
        let entry = TimesheetEntry {
            id,
            date: self.date.trim().to_string(),
            project: self.project.trim().to_string(),
            hours: self.hours,
            note: self.note.trim().to_string(),
        };

        entry.validate()?;
        entry.check_single_line()?;

        Ok(entry)
    }
}

/// Service for timesheet entry management
pub struct EntryService<'a> {
    storage: &'a Storage,
}

impl<'a> EntryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and append a new entry
    pub fn create(&self, input: EntryInput) -> TimesheetResult<TimesheetEntry> {
        let entry = input.into_entry(EntryId::new())?;

        self.storage.entries.append(entry.clone())?;
        self.storage.entries.save()?;
        self.storage.log_create(&entry);

        info!(id = %entry.id, project = %entry.project, hours = entry.hours, "created entry");
        Ok(entry)
    }

    /// Replace an existing entry in place, keeping its id and position
    pub fn update(&self, id: EntryId, input: EntryInput) -> TimesheetResult<TimesheetEntry> {
        let before = self
            .storage
            .entries
            .get(id)?
            .ok_or_else(|| TimesheetError::entry_not_found(id.to_string()))?;

        let after = input.into_entry(id)?;

        self.storage.entries.replace(id, after.clone())?;
        self.storage.entries.save()?;

        let diff = diff_serialized(&before, &after);
        self.storage.log_update(&before, &after, diff);

        info!(id = %id, "updated entry");
        Ok(after)
    }

    /// Delete an entry
    pub fn delete(&self, id: EntryId) -> TimesheetResult<TimesheetEntry> {
        let removed = self
            .storage
            .entries
            .remove(id)?
            .ok_or_else(|| TimesheetError::entry_not_found(id.to_string()))?;

        self.storage.entries.save()?;
        self.storage.log_deletes(std::slice::from_ref(&removed));

        info!(id = %id, "deleted entry");
        Ok(removed)
    }

    /// Remove every entry; returns how many were removed
    pub fn clear_all(&self) -> TimesheetResult<usize> {
        let removed = self.storage.entries.clear()?;

        self.storage.entries.save()?;
        self.storage.log_deletes(&removed);

        info!(count = removed.len(), "cleared all entries");
        Ok(removed.len())
    }

    pub fn get(&self, id: EntryId) -> TimesheetResult<Option<TimesheetEntry>> {
        self.storage.entries.get(id)
    }

    /// All entries in storage order
    pub fn list(&self) -> TimesheetResult<Vec<TimesheetEntry>> {
        self.storage.entries.get_all()
    }

    /// Find an entry by full id or by a unique short id (`ent-1a2b3c4d`)
    pub fn find(&self, identifier: &str) -> TimesheetResult<Option<TimesheetEntry>> {
        let identifier = identifier.trim();

        if let Ok(id) = identifier.parse::<EntryId>() {
            return self.get(id);
        }

        let mut matches = self
            .list()?
            .into_iter()
            .filter(|e| e.id.matches_short(identifier));

        match (matches.next(), matches.next()) {
            (Some(entry), None) => Ok(Some(entry)),
            (None, _) => Ok(None),
            (Some(_), Some(_)) => Err(TimesheetError::Validation(format!(
                "Entry id '{}' is ambiguous, use more characters",
                identifier
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::TimesheetPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TimesheetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all();
        (temp_dir, storage)
    }

    #[test]
    fn test_create_trims_and_persists() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let entry = service
            .create(EntryInput::new("2024-01-05", "  Acme  ", 3.5, " kickoff "))
            .unwrap();
        assert_eq!(entry.project, "Acme");
        assert_eq!(entry.note, "kickoff");

        // Reload from disk
        storage.entries.load();
        let all = service.list().unwrap();
        assert_eq!(all, vec![entry]);
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let cases = [
            EntryInput::new("", "Acme", 1.0, ""),
            EntryInput::new("2024-01-05", "   ", 1.0, ""),
            EntryInput::new("2024-01-05", "Acme", 0.0, ""),
            EntryInput::new("2024-01-05", "Acme", -1.0, ""),
            EntryInput::new("2024-01-05", "Acme", f64::NAN, ""),
        ];

        for input in cases {
            let err = service.create(input).unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(storage.entries.count().unwrap(), 0);
        assert!(storage.audit().read_all().unwrap().is_empty());
    }

    #[test]
    fn test_create_rejects_line_breaks() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let cases = [
            EntryInput::new("2024-01-05", "Acme", 1.0, "line one\nline two"),
            EntryInput::new("2024-01-05", "Multi\nline", 1.0, ""),
            EntryInput::new("2024-01-05\r2024-01-06", "Acme", 1.0, ""),
        ];
        for input in cases {
            assert!(service.create(input).unwrap_err().is_validation());
        }

        // Trailing line breaks are trimmed away and are fine
        let entry = service
            .create(EntryInput::new("2024-01-05", "Acme", 1.0, "kickoff\n"))
            .unwrap();
        assert_eq!(entry.note, "kickoff");

        let stored = service.list().unwrap();
        assert_eq!(crate::codec::from_csv(&crate::codec::to_csv(&stored)).len(), 1);
    }

    #[test]
    fn test_audit_failure_after_save_still_succeeds() {
        let (temp_dir, storage) = create_test_storage();
        std::fs::create_dir(temp_dir.path().join("audit.log")).unwrap();
        let service = EntryService::new(&storage);

        let entry = service
            .create(EntryInput::new("2024-01-05", "Acme", 1.0, ""))
            .unwrap();
        service
            .update(entry.id, EntryInput::new("2024-01-05", "Acme", 2.0, ""))
            .unwrap();

        storage.entries.load();
        assert_eq!(service.list().unwrap()[0].hours, 2.0);

        service.delete(entry.id).unwrap();
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_update_keeps_position_and_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let first = service
            .create(EntryInput::new("2024-01-05", "Acme", 1.0, ""))
            .unwrap();
        let second = service
            .create(EntryInput::new("2024-01-06", "Beta", 2.0, ""))
            .unwrap();

        let updated = service
            .update(first.id, EntryInput::new("2024-01-07", "Acme", 4.0, "moved"))
            .unwrap();
        assert_eq!(updated.id, first.id);

        let all = service.list().unwrap();
        assert_eq!(all[0], updated);
        assert_eq!(all[1], second);

        let last = storage.audit().read_recent(1).unwrap().remove(0);
        assert_eq!(last.operation, Operation::Update);
        assert!(last.diff_summary.unwrap().contains("hours: 1.0 -> 4.0"));
    }

    #[test]
    fn test_update_invalid_leaves_entry_untouched() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let entry = service
            .create(EntryInput::new("2024-01-05", "Acme", 1.0, ""))
            .unwrap();
        assert!(service
            .update(entry.id, EntryInput::new("2024-01-05", "", 1.0, ""))
            .is_err());
        assert_eq!(service.get(entry.id).unwrap(), Some(entry));
    }

    #[test]
    fn test_update_unknown_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let err = service
            .update(EntryId::new(), EntryInput::new("2024-01-05", "Acme", 1.0, ""))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_and_clear_all() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let a = service
            .create(EntryInput::new("2024-01-05", "Acme", 1.0, ""))
            .unwrap();
        service
            .create(EntryInput::new("2024-01-06", "Beta", 2.0, ""))
            .unwrap();
        service
            .create(EntryInput::new("2024-01-07", "Gamma", 3.0, ""))
            .unwrap();

        assert_eq!(service.delete(a.id).unwrap().id, a.id);
        assert!(service.delete(a.id).unwrap_err().is_not_found());

        assert_eq!(service.clear_all().unwrap(), 2);
        storage.entries.load();
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_find_by_full_and_short_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let entry = service
            .create(EntryInput::new("2024-01-05", "Acme", 1.0, ""))
            .unwrap();

        let full = entry.id.as_uuid().to_string();
        assert_eq!(service.find(&full).unwrap(), Some(entry.clone()));
        assert_eq!(
            service.find(&entry.id.to_string()).unwrap(),
            Some(entry.clone())
        );
        assert_eq!(service.find("ent-zzzz").unwrap(), None);
    }
}
