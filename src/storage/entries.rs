//! Entry repository for JSON storage
//!
//! Holds the ordered entry sequence in memory and mirrors it to a single
//! JSON array document. Insertion order is the storage order; any other
//! ordering is a view concern.

use std::path::PathBuf;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::error::TimesheetError;
use crate::models::{EntryId, TimesheetEntry};

use super::file_io::{read_document, write_document, StoredDocument};

/// Repository for timesheet entry persistence
pub struct EntryRepository {
    path: PathBuf,
    data: RwLock<Vec<TimesheetEntry>>,
}

impl EntryRepository {
    /// Create a new, empty entry repository backed by `path`
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Read and parse the persisted document
    ///
    /// A document that was never written is an empty sequence. Entries that
    /// violate the store invariants (hand-edited files) are skipped.
    pub fn try_load(&self) -> Result<Vec<TimesheetEntry>, TimesheetError> {
        let entries: Vec<TimesheetEntry> = match read_document(&self.path)? {
            StoredDocument::Absent => {
                debug!(path = %self.path.display(), "no stored entries yet");
                return Ok(Vec::new());
            }
            StoredDocument::Present(entries) => entries,
        };
        let total = entries.len();

        let valid: Vec<_> = entries.into_iter().filter(|e| e.is_valid()).collect();
        if valid.len() < total {
            warn!(
                skipped = total - valid.len(),
                path = %self.path.display(),
                "skipped invalid stored entries"
            );
        }

        Ok(valid)
    }

    /// Load entries from disk, replacing the in-memory sequence
    ///
    /// Never fails: an unreadable or corrupt document leaves the store empty.
    /// Returns the number of entries loaded.
    pub fn load(&self) -> usize {
        let entries = match self.try_load() {
            Ok(entries) => entries,
            Err(e) if e.is_corrupt_store() => {
                warn!(error = %e, "stored entries are corrupt, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "could not read stored entries, starting empty");
                Vec::new()
            }
        };

        let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *data = entries;
        debug!(count = data.len(), "loaded timesheet entries");
        data.len()
    }

    /// Overwrite the persisted document with the full sequence
    pub fn save(&self) -> Result<(), TimesheetError> {
        let data = self.read()?;
        write_document(&self.path, data.as_slice())
    }

    /// Get a copy of every entry in storage order
    pub fn get_all(&self) -> Result<Vec<TimesheetEntry>, TimesheetError> {
        Ok(self.read()?.clone())
    }

    /// Get an entry by ID
    pub fn get(&self, id: EntryId) -> Result<Option<TimesheetEntry>, TimesheetError> {
        Ok(self.read()?.iter().find(|e| e.id == id).cloned())
    }

    /// Storage position of an entry
    pub fn position(&self, id: EntryId) -> Result<Option<usize>, TimesheetError> {
        Ok(self.read()?.iter().position(|e| e.id == id))
    }

    /// Count entries
    pub fn count(&self) -> Result<usize, TimesheetError> {
        Ok(self.read()?.len())
    }

    /// Append an entry at the end of the sequence
    pub fn append(&self, entry: TimesheetEntry) -> Result<(), TimesheetError> {
        self.write()?.push(entry);
        Ok(())
    }

    /// Append several entries, keeping their order
    pub fn extend(&self, entries: Vec<TimesheetEntry>) -> Result<(), TimesheetError> {
        self.write()?.extend(entries);
        Ok(())
    }

    /// Replace the entry at `index`, returning the previous one
    pub fn replace_at(
        &self,
        index: usize,
        entry: TimesheetEntry,
    ) -> Result<TimesheetEntry, TimesheetError> {
        let mut data = self.write()?;
        let slot = data
            .get_mut(index)
            .ok_or_else(|| TimesheetError::entry_not_found(format!("index {}", index)))?;
        Ok(std::mem::replace(slot, entry))
    }

    /// Remove the entry at `index`
    pub fn remove_at(&self, index: usize) -> Result<TimesheetEntry, TimesheetError> {
        let mut data = self.write()?;
        if index >= data.len() {
            return Err(TimesheetError::entry_not_found(format!("index {}", index)));
        }
        Ok(data.remove(index))
    }

    /// Replace an entry in place, keeping its position
    pub fn replace(
        &self,
        id: EntryId,
        entry: TimesheetEntry,
    ) -> Result<TimesheetEntry, TimesheetError> {
        let index = self
            .position(id)?
            .ok_or_else(|| TimesheetError::entry_not_found(id.to_string()))?;
        self.replace_at(index, entry)
    }

    /// Remove an entry by ID
    pub fn remove(&self, id: EntryId) -> Result<Option<TimesheetEntry>, TimesheetError> {
        match self.position(id)? {
            Some(index) => self.remove_at(index).map(Some),
            None => Ok(None),
        }
    }

    /// Remove every entry, returning what was removed
    pub fn clear(&self) -> Result<Vec<TimesheetEntry>, TimesheetError> {
        Ok(std::mem::take(&mut *self.write()?))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<TimesheetEntry>>, TimesheetError> {
        self.data
            .read()
            .map_err(|e| TimesheetError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<TimesheetEntry>>, TimesheetError> {
        self.data
            .write()
            .map_err(|e| TimesheetError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, EntryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("timesheet_entries_v1.json");
        let repo = EntryRepository::new(path);
        (temp_dir, repo)
    }

    fn entry(date: &str, project: &str, hours: f64) -> TimesheetEntry {
        TimesheetEntry::new(date, project, hours, "")
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.load(), 0);
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(temp_dir.path().join("timesheet_entries_v1.json"), "[{oops").unwrap();

        assert!(repo.try_load().unwrap_err().is_corrupt_store());
        assert_eq!(repo.load(), 0);
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_load_replaces_in_memory_state() {
        let (temp_dir, repo) = create_test_repo();
        repo.append(entry("2024-01-01", "Acme", 1.0)).unwrap();

        std::fs::write(temp_dir.path().join("timesheet_entries_v1.json"), "not json").unwrap();
        repo.load();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_load_skips_invalid_entries() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(
            temp_dir.path().join("timesheet_entries_v1.json"),
            r#"[
                {"date": "2024-01-01", "project": "Acme", "hours": 2, "note": "ok"},
                {"date": "2024-01-02", "project": "", "hours": 2, "note": ""},
                {"date": "2024-01-03", "project": "Acme", "hours": 0, "note": ""}
            ]"#,
        )
        .unwrap();

        assert_eq!(repo.load(), 1);
        assert_eq!(repo.get_all().unwrap()[0].note, "ok");
    }

    #[test]
    fn test_save_and_load_preserves_order_and_ids() {
        let (_temp_dir, repo) = create_test_repo();
        let entries = vec![
            entry("2024-01-03", "Gamma", 3.0),
            entry("2024-01-01", "Acme", 1.0),
            entry("2024-01-02", "Beta", 2.0),
        ];
        for e in &entries {
            repo.append(e.clone()).unwrap();
        }
        repo.save().unwrap();

        repo.clear().unwrap();
        assert_eq!(repo.load(), 3);
        assert_eq!(repo.get_all().unwrap(), entries);
    }

    #[test]
    fn test_persisted_layout_is_json_array() {
        let (temp_dir, repo) = create_test_repo();
        repo.append(TimesheetEntry::new("2024-01-05", "Acme", 3.5, "kickoff"))
            .unwrap();
        repo.save().unwrap();

        let raw =
            std::fs::read_to_string(temp_dir.path().join("timesheet_entries_v1.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value.as_array().unwrap()[0];
        assert_eq!(first["date"], "2024-01-05");
        assert_eq!(first["project"], "Acme");
        assert_eq!(first["hours"], 3.5);
        assert_eq!(first["note"], "kickoff");
    }

    #[test]
    fn test_replace_and_remove_at() {
        let (_temp_dir, repo) = create_test_repo();
        repo.append(entry("2024-01-01", "Acme", 1.0)).unwrap();
        repo.append(entry("2024-01-02", "Beta", 2.0)).unwrap();

        let old = repo.replace_at(1, entry("2024-01-02", "Beta", 4.0)).unwrap();
        assert_eq!(old.hours, 2.0);
        assert_eq!(repo.get_all().unwrap()[1].hours, 4.0);

        let removed = repo.remove_at(0).unwrap();
        assert_eq!(removed.project, "Acme");
        assert_eq!(repo.count().unwrap(), 1);

        assert!(repo.remove_at(5).unwrap_err().is_not_found());
        assert!(repo
            .replace_at(5, entry("2024-01-01", "X", 1.0))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_replace_by_id_keeps_position() {
        let (_temp_dir, repo) = create_test_repo();
        let first = entry("2024-01-01", "Acme", 1.0);
        let second = entry("2024-01-02", "Beta", 2.0);
        repo.append(first.clone()).unwrap();
        repo.append(second.clone()).unwrap();

        let mut updated = first.clone();
        updated.hours = 6.0;
        repo.replace(first.id, updated).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].hours, 6.0);
        assert_eq!(all[1].id, second.id);
    }

    #[test]
    fn test_remove_by_id() {
        let (_temp_dir, repo) = create_test_repo();
        let e = entry("2024-01-01", "Acme", 1.0);
        repo.append(e.clone()).unwrap();

        assert_eq!(repo.remove(e.id).unwrap().map(|r| r.id), Some(e.id));
        assert!(repo.remove(e.id).unwrap().is_none());
        assert!(repo.get(e.id).unwrap().is_none());
    }

    #[test]
    fn test_duplicates_are_allowed() {
        let (_temp_dir, repo) = create_test_repo();
        repo.append(entry("2024-01-01", "Acme", 1.0)).unwrap();
        repo.append(entry("2024-01-01", "Acme", 1.0)).unwrap();
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_clear_returns_removed_entries() {
        let (_temp_dir, repo) = create_test_repo();
        repo.extend(vec![
            entry("2024-01-01", "Acme", 1.0),
            entry("2024-01-02", "Beta", 2.0),
        ])
        .unwrap();

        assert_eq!(repo.clear().unwrap().len(), 2);
        assert_eq!(repo.count().unwrap(), 0);
    }
}
