//! Audit logging for timesheet entries
//!
//! Records every create, update and delete with before/after values in an
//! append-only JSONL log.
//!
//! - `AuditEntry`: one record with timestamp, operation, entry id and
//!   optional before/after values.
//! - `AuditLogger`: appends records to the log file and reads them back.
//! - `generate_diff`: one-line summary of changed fields.

mod diff;
mod entry;
mod logger;

pub use diff::{diff_serialized, generate_diff};
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
