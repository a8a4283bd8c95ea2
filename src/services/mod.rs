//! Service layer for the timesheet tracker
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, persistence after each mutation, and audit logging.

pub mod entry;
pub mod import;
pub mod session;

pub use entry::{EntryInput, EntryService};
pub use import::{ImportResult, ImportService};
pub use session::EditSession;
