use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::fmt;

/// Why a single row did not make it into the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowErrorKind {
    /// The CSV reader could not decode the row at all.
    Malformed,
    InvalidRecordLength,
    BadEntryTime,
    BadExitTime,
    /// The row parsed but the store rejected the write.
    Storage,
}

/// One failed row of an import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    /// 1-based data row index; the header is not counted.
    pub row: usize,
    pub kind: RowErrorKind,
    pub detail: String,
}

impl RowError {
    pub fn new(row: usize, kind: RowErrorKind, detail: impl Into<String>) -> Self {
        Self {
            row,
            kind,
            detail: detail.into(),
        }
    }

    /// The flat message a caller displays for this row.
    pub fn message(&self) -> String {
        match self.kind {
            RowErrorKind::InvalidRecordLength => "invalid record length".to_string(),
            RowErrorKind::BadEntryTime => "bad entry_time".to_string(),
            RowErrorKind::BadExitTime => "bad exit_time".to_string(),
            RowErrorKind::Malformed | RowErrorKind::Storage => self.detail.clone(),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RowErrorKind::Malformed | RowErrorKind::Storage => {
                write!(f, "row {}: {}", self.row, self.detail)
            }
            _ => write!(f, "row {}: {} ({})", self.row, self.message(), self.detail),
        }
    }
}

/// The best-effort outcome of an import.
///
/// Serializes as `{ imported, skipped, errors }` with `errors` flattened to
/// the list of row messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    /// Reserved; nothing is counted as skipped today.
    pub skipped: usize,
    #[serde(serialize_with = "serialize_messages")]
    pub errors: Vec<RowError>,
}

impl ImportReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(RowError::message).collect()
    }

    pub(crate) fn record(&mut self, error: RowError) {
        tracing::warn!(row = error.row, kind = ?error.kind, "{}", error);
        self.errors.push(error);
    }
}

fn serialize_messages<S: Serializer>(errors: &[RowError], serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(errors.len()))?;
    for error in errors {
        seq.serialize_element(&error.message())?;
    }
    seq.end()
}
