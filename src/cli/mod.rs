//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod entry;
pub mod export;
pub mod history;
pub mod import;
pub mod report;

pub use entry::{handle_entry_command, EntryCommands};
pub use export::handle_export_command;
pub use history::handle_history_command;
pub use import::handle_import_command;
pub use report::{handle_report_command, ReportArgs};
