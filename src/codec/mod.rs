//! Text codecs for timesheet data

pub mod csv;

pub use self::csv::{from_csv, split_csv_line, to_csv, CSV_HEADERS};
