//! Note domain type.

use chrono::{DateTime, SubsecRound, Utc};
use notekeep_core::{NoteId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::NoteError;

/// Note text that is known to be trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteText(String);

impl NoteText {
    /// Trims `raw` and rejects it if nothing is left.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::EmptyText` for empty or whitespace-only input and
    /// `NoteError::NulCharacter` if the text contains U+0000.
    pub fn parse(raw: &str) -> Result<Self, NoteError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(NoteError::EmptyText);
        }
        if trimmed.contains('\0') {
            return Err(NoteError::NulCharacter);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NoteText {
    type Error = NoteError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NoteText> for String {
    fn from(text: NoteText) -> Self {
        text.0
    }
}

impl fmt::Display for NoteText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A text memo owned by exactly one user.
///
/// The owner is fixed at creation. Notes are never updated in place, so
/// `updated_at` equals `created_at` unless a future operation changes that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    id: NoteId,
    owner: UserId,
    text: NoteText,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Note {
    /// Creates a new note for `owner`, stamped with the current time.
    ///
    /// Timestamps are truncated to microseconds, the precision Postgres keeps,
    /// so a freshly created note equals the one read back later.
    #[must_use]
    pub fn new(owner: UserId, text: NoteText) -> Self {
        let now = Utc::now().trunc_subsecs(6);
        Self {
            id: NoteId::new(),
            owner,
            text,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a note with all fields specified.
    ///
    /// Use this when reconstituting a note from storage.
    #[must_use]
    pub fn with_all_fields(
        id: NoteId,
        owner: UserId,
        text: NoteText,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            text,
            created_at,
            updated_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> NoteId {
        self.id
    }

    #[must_use]
    pub fn owner(&self) -> UserId {
        self.owner
    }

    #[must_use]
    pub fn text(&self) -> &NoteText {
        &self.text
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_empty_and_whitespace() {
        assert!(matches!(NoteText::parse(""), Err(NoteError::EmptyText)));
        assert!(matches!(NoteText::parse("   "), Err(NoteError::EmptyText)));
        assert!(matches!(NoteText::parse("\n\t "), Err(NoteError::EmptyText)));
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let text = NoteText::parse("  hello  ").expect("valid");
        assert_eq!(text.as_str(), "hello");
    }

    #[test]
    fn parse_keeps_inner_whitespace() {
        let text = NoteText::parse(" buy  milk\n").expect("valid");
        assert_eq!(text.as_str(), "buy  milk");
    }

    #[test]
    fn parse_rejects_nul_character() {
        assert!(matches!(
            NoteText::parse("buy\0milk"),
            Err(NoteError::NulCharacter)
        ));
    }

    #[test]
    fn deserializing_text_validates() {
        let err = serde_json::from_str::<NoteText>("\"  \"");
        assert!(err.is_err());

        let text: NoteText = serde_json::from_str("\" hi \"").expect("valid");
        assert_eq!(text.as_str(), "hi");
    }

    #[test]
    fn new_note_has_matching_timestamps() {
        let note = Note::new(UserId::new(), NoteText::parse("a").expect("valid"));
        assert_eq!(note.created_at(), note.updated_at());
        assert!(note.id().to_string().starts_with("note_"));
    }

    #[test]
    fn new_note_timestamps_have_microsecond_precision() {
        let note = Note::new(UserId::new(), NoteText::parse("a").expect("valid"));
        assert_eq!(note.created_at().timestamp_subsec_nanos() % 1_000, 0);
    }
}
