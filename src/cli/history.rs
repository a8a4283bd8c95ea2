//! CLI command for viewing the audit log

use crate::error::TimesheetResult;
use crate::storage::Storage;

/// Handle the history command
pub fn handle_history_command(storage: &Storage, limit: usize) -> TimesheetResult<()> {
    let entries = storage.audit().read_recent(limit)?;

    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
