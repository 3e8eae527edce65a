//! # Tradelog CSV Importer
//!
//! Bulk-loads trades from a CSV payload into any `TradeStore`.
//!
//! The import is best-effort: bad rows are collected in an `ImportReport`
//! and never abort the batch. Only an unreadable header fails the whole call.
//! There is no batch atomicity; rows already written stay written.

pub mod csv_import;
pub mod error;
pub mod report;

pub use csv_import::{FIELD_COUNT, import_csv, import_csv_file};
pub use error::ImportError;
pub use report::{ImportReport, RowError, RowErrorKind};
