//! Edit session state
//!
//! Tracks which entry (if any) the entry form is currently editing, so that
//! submitting the form either creates a new entry or replaces the one being
//! edited.

use crate::error::{TimesheetError, TimesheetResult};
use crate::models::{EntryId, TimesheetEntry};

use super::entry::{EntryInput, EntryService};

/// Session state owned by the front-end for the lifetime of the form
#[derive(Debug, Default)]
pub struct EditSession {
    editing: Option<EntryId>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an entry; returns the stored entry to prefill the form
    pub fn begin_edit(
        &mut self,
        service: &EntryService<'_>,
        id: EntryId,
    ) -> TimesheetResult<TimesheetEntry> {
        let entry = service
            .get(id)?
            .ok_or_else(|| TimesheetError::entry_not_found(id.to_string()))?;
        self.editing = Some(id);
        Ok(entry)
    }

    /// Leave edit mode (form reset)
    pub fn clear_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<EntryId> {
        self.editing
    }

    /// Submit the form: replace the edited entry, or create a new one
    ///
    /// Edit mode ends only when the submission succeeds, so a rejected form
    /// can be corrected and resubmitted.
    pub fn submit(
        &mut self,
        service: &EntryService<'_>,
        input: EntryInput,
    ) -> TimesheetResult<TimesheetEntry> {
        let entry = match self.editing {
            Some(id) => service.update(id, input)?,
            None => service.create(input)?,
        };
        self.clear_edit();
        Ok(entry)
    }
}
