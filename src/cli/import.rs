//! CLI command handler for CSV import

use std::path::Path;

use tracing::warn;

use crate::error::{TimesheetError, TimesheetResult};
use crate::services::ImportService;
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(storage: &Storage, file: &Path) -> TimesheetResult<()> {
    let result = match ImportService::new(storage).import_file(file) {
        Ok(result) => result,
        Err(err) => {
            warn!(error = %err, "import failed");
            return Err(TimesheetError::Import(format!(
                "could not import {}",
                file.display()
            )));
        }
    };

    if result.is_empty() {
        println!("No usable data found in {}.", file.display());
        return Ok(());
    }

    println!("Imported {} entries from {}", result.imported, file.display());
    Ok(())
}
