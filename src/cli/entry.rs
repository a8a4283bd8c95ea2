//! Entry CLI commands
//!
//! Implements the commands that create, edit, delete and list timesheet
//! entries.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::entry::{format_entry_details, format_entry_list};
use crate::error::{TimesheetError, TimesheetResult};
use crate::models::{parse_entry_date, TimesheetEntry};
use crate::reports::EntryFilter;
use crate::services::{EditSession, EntryInput, EntryService};
use crate::storage::Storage;

/// Entry subcommands
#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// Log a block of work
    Add {
        /// Project the hours are booked against
        #[arg(short, long)]
        project: String,
        /// Hours worked (e.g., 1.5)
        #[arg(short = 'H', long)]
        hours: f64,
        /// Work date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Optional note
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// Edit an existing entry
    Edit {
        /// Entry ID (full or short form, e.g. ent-1a2b3c4d)
        id: String,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New project
        #[arg(short, long)]
        project: Option<String>,
        /// New hours
        #[arg(short = 'H', long)]
        hours: Option<f64>,
        /// New note
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Delete an entry
    Delete {
        /// Entry ID (full or short form)
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
    /// List entries, newest first
    #[command(alias = "ls")]
    List {
        /// Earliest date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Latest date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Project keyword (case-insensitive)
        #[arg(short, long)]
        project: Option<String>,
    },
    /// Delete every entry
    Clear {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle an entry command
pub fn handle_entry_command(
    storage: &Storage,
    settings: &Settings,
    cmd: EntryCommands,
) -> TimesheetResult<()> {
    let service = EntryService::new(storage);

    match cmd {
        EntryCommands::Add {
            project,
            hours,
            date,
            note,
        } => {
            let date = date.unwrap_or_else(today);
            let mut session = EditSession::new();
            let entry = session.submit(&service, EntryInput::new(date, project, hours, note))?;

            println!("Logged {} hours on {}", entry.hours, entry.project);
            print!("{}", format_entry_details(&entry, &settings.date_format));
        }

        EntryCommands::Edit {
            id,
            date,
            project,
            hours,
            note,
        } => {
            let found = find_entry(&service, &id)?;

            if date.is_none() && project.is_none() && hours.is_none() && note.is_none() {
                println!("No changes specified. Use --date, --project, --hours or --note.");
                return Ok(());
            }

            let mut session = EditSession::new();
            let current = session.begin_edit(&service, found.id)?;

            let mut input = EntryInput::from_entry(&current);
            if let Some(date) = date {
                input.date = date;
            }
            if let Some(project) = project {
                input.project = project;
            }
            if let Some(hours) = hours {
                input.hours = hours;
            }
            if let Some(note) = note {
                input.note = note;
            }

            let updated = session.submit(&service, input)?;
            println!("Updated entry:");
            print!("{}", format_entry_details(&updated, &settings.date_format));
        }

        EntryCommands::Delete { id, force } => {
            let found = find_entry(&service, &id)?;

            if !force {
                print!("{}", format_entry_details(&found, &settings.date_format));
                println!();
                println!("To delete this entry, run again with --force flag:");
                println!("  timesheet delete {} --force", found.id);
                return Ok(());
            }

            let removed = service.delete(found.id)?;
            println!("Deleted entry {} ({} hours on {})", removed.id, removed.hours, removed.project);
        }

        EntryCommands::List { from, to, project } => {
            let filter = build_filter(from, to, project)?;
            let entries = filter.apply(&service.list()?);
            println!("{}", format_entry_list(&entries, &settings.date_format));
        }

        EntryCommands::Clear { force } => {
            let count = storage.entries.count()?;
            if count == 0 {
                println!("No entries to clear.");
                return Ok(());
            }

            if !force {
                println!("WARNING: This will delete all {} entries!", count);
                println!("To proceed, run again with --force flag:");
                println!("  timesheet clear --force");
                return Ok(());
            }

            let removed = service.clear_all()?;
            println!("Deleted {} entries.", removed);
        }
    }

    Ok(())
}

/// Resolve an entry from a full or short ID
pub(crate) fn find_entry(service: &EntryService<'_>, id: &str) -> TimesheetResult<TimesheetEntry> {
    service
        .find(id)?
        .ok_or_else(|| TimesheetError::entry_not_found(id))
}

/// Build a list/report filter from command-line options
pub(crate) fn build_filter(
    from: Option<String>,
    to: Option<String>,
    project: Option<String>,
) -> TimesheetResult<EntryFilter> {
    Ok(EntryFilter {
        start_date: parse_date_arg(from.as_deref(), "start")?,
        end_date: parse_date_arg(to.as_deref(), "end")?,
        project_contains: project,
    })
}

fn parse_date_arg(value: Option<&str>, which: &str) -> TimesheetResult<Option<NaiveDate>> {
    value
        .map(|s| {
            parse_entry_date(s).ok_or_else(|| {
                TimesheetError::Validation(format!(
                    "Invalid {} date format: {}. Use YYYY-MM-DD",
                    which, s
                ))
            })
        })
        .transpose()
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}
