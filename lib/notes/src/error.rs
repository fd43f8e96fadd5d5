//! Error types for note operations.

use notekeep_core::StoreError;
use rootcause::Report;
use std::fmt;

/// Errors from owner-scoped note operations.
#[derive(Debug)]
pub enum NoteError {
    /// The note text was empty after trimming.
    EmptyText,
    /// The note text contains a NUL character, which cannot be stored.
    NulCharacter,
    /// No note with this ID is owned by the caller.
    ///
    /// Used both when the note does not exist and when it belongs to someone
    /// else, so callers cannot learn which notes exist.
    NotFound { id: String },
    /// The backing store failed.
    Storage(Report<StoreError>),
}

impl NoteError {
    /// Builds a not-found error for an ID as the caller supplied it.
    pub fn not_found(id: impl fmt::Display) -> Self {
        Self::NotFound { id: id.to_string() }
    }
}

impl fmt::Display for NoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => write!(f, "note text is empty"),
            Self::NulCharacter => write!(f, "note text contains a NUL character"),
            Self::NotFound { id } => write!(f, "note '{id}' not found"),
            Self::Storage(report) => write!(f, "note storage error: {report}"),
        }
    }
}

impl std::error::Error for NoteError {}

impl From<Report<StoreError>> for NoteError {
    fn from(report: Report<StoreError>) -> Self {
        Self::Storage(report)
    }
}
