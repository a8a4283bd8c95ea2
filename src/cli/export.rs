//! CLI command handler for CSV export

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::error::{TimesheetError, TimesheetResult};
use crate::export::{default_export_file_name, export_entries_csv};
use crate::storage::Storage;

/// Handle the export command
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    output: Option<PathBuf>,
) -> TimesheetResult<()> {
    let output = output.unwrap_or_else(|| default_export_file_name(&settings.export_prefix));

    let file = File::create(&output).map_err(|e| {
        TimesheetError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    let mut writer = BufWriter::new(file);

    let count = export_entries_csv(storage, &mut writer)?;
    println!("Exported {} entries to: {}", count, output.display());

    Ok(())
}
