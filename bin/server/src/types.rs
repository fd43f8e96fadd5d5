//! JSON shapes exchanged with the browser client.
//!
//! Field names follow what the existing client already reads, hence the
//! camelCase keys and the `_id` note key.

use chrono::{DateTime, Utc};
use notekeep_notes::Note;
use notekeep_platform_access::User;
use serde::{Deserialize, Serialize};

/// The signed-in user's profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            display_name: user.display_name().map(str::to_string),
            email: user.email().map(str::to_string),
        }
    }
}

/// A note as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Note> for NoteView {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            text: note.text().to_string(),
            created_at: note.created_at(),
            updated_at: note.updated_at(),
        }
    }
}

/// Body of `POST /api/notes`.
///
/// A missing `text` is treated like an empty one.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewNote {
    #[serde(default)]
    pub text: Option<String>,
}
