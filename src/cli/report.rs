//! CLI command for the timesheet report

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;

use crate::error::{TimesheetError, TimesheetResult};
use crate::reports::TimesheetReport;
use crate::storage::Storage;

use super::entry::build_filter;

/// Options for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Earliest date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Project keyword (case-insensitive)
    #[arg(short, long)]
    pub project: Option<String>,

    /// Write the totals to a CSV file instead of the terminal
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,
}

/// Handle the report command
pub fn handle_report_command(storage: &Storage, args: ReportArgs) -> TimesheetResult<()> {
    let filter = build_filter(args.from, args.to, args.project)?;
    let report = TimesheetReport::generate(storage, filter)?;

    match args.csv {
        Some(output) => {
            let file = File::create(&output).map_err(|e| {
                TimesheetError::Export(format!(
                    "Failed to create file {}: {}",
                    output.display(),
                    e
                ))
            })?;
            report.export_csv(BufWriter::new(file))?;
            println!("{}", report.summary_line());
            println!("Report exported to: {}", output.display());
        }
        None => print!("{}", report.format_terminal()),
    }

    Ok(())
}
