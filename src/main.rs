use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use timesheet::cli::{
    handle_entry_command, handle_export_command, handle_history_command, handle_import_command,
    handle_report_command, EntryCommands, ReportArgs,
};
use timesheet::config::{paths::TimesheetPaths, settings::Settings};
use timesheet::storage::Storage;

#[derive(Parser)]
#[command(
    name = "timesheet",
    version,
    about = "Log hours against projects and summarize them",
    long_about = "A small timesheet tracker for the command line. Log hours \
                  against projects, edit and delete entries, move data in and \
                  out as CSV, and summarize hours by project and by month."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Entry(EntryCommands),

    /// Import entries from a CSV file
    Import {
        /// Path to CSV file
        file: PathBuf,
    },

    /// Export all entries to a CSV file
    Export {
        /// Output file path (defaults to timesheet_export_<millis>.csv)
        output: Option<PathBuf>,
    },

    /// Summarize hours by project and by month
    Report(ReportArgs),

    /// Show recent changes from the audit log
    History {
        /// Number of records to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TimesheetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.set_audit_enabled(settings.audit_enabled);
    storage.load_all();

    match cli.command {
        Some(Commands::Entry(cmd)) => {
            handle_entry_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Import { file }) => {
            handle_import_command(&storage, &file)?;
        }
        Some(Commands::Export { output }) => {
            handle_export_command(&storage, &settings, output)?;
        }
        Some(Commands::Report(args)) => {
            handle_report_command(&storage, args)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&storage, limit)?;
        }
        Some(Commands::Config) => {
            println!("Timesheet Configuration");
            println!("=======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Entries file:   {}", paths.entries_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Date format:   {}", settings.date_format);
            println!("  Audit enabled: {}", settings.audit_enabled);
            println!("  Export prefix: {}", settings.export_prefix);
        }
        None => {
            println!("Timesheet - log hours against projects");
            println!();
            println!("Run 'timesheet --help' for usage information.");
            println!("Run 'timesheet add --project NAME --hours N' to log work.");
        }
    }

    Ok(())
}
