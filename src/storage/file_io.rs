//! Whole-document JSON persistence
//!
//! The entry store is one JSON array that is rewritten on every save. Reads
//! tell a document that was never written apart from one that exists but
//! can't be parsed: the first is a normal empty store, the second is reported
//! as [`TimesheetError::CorruptStore`] so the repository can warn and recover.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{TimesheetError, TimesheetResult};

/// What was found at a document path
#[derive(Debug, PartialEq)]
pub enum StoredDocument<T> {
    /// Nothing has been saved yet
    Absent,
    Present(T),
}

impl<T: Default> StoredDocument<T> {
    /// The parsed document, or an empty one if it was never written
    pub fn or_default(self) -> T {
        match self {
            Self::Absent => T::default(),
            Self::Present(document) => document,
        }
    }
}

/// Read and parse a JSON document
pub fn read_document<T: DeserializeOwned>(path: &Path) -> TimesheetResult<StoredDocument<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StoredDocument::Absent),
        Err(e) => {
            return Err(TimesheetError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_slice(&bytes)
        .map(StoredDocument::Present)
        .map_err(|e| TimesheetError::CorruptStore {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

/// Replace a JSON document on disk
///
/// The new content goes to a staging file beside the target which is synced
/// and then renamed over it, so readers see the old document or the new one.
pub fn write_document<T: Serialize + ?Sized>(path: &Path, document: &T) -> TimesheetResult<()> {
    let bytes = serde_json::to_vec_pretty(document).map_err(|e| {
        TimesheetError::Storage(format!("Failed to serialize {}: {}", path.display(), e))
    })?;

    let staging = staging_path(path);
    write_staged(&staging, path, &bytes).map_err(|e| {
        let _ = fs::remove_file(&staging);
        TimesheetError::Storage(format!("Failed to write {}: {}", path.display(), e))
    })
}

fn write_staged(staging: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(staging)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(staging, target)
}

/// `<name>.tmp` in the target's directory
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
