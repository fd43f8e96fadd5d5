//! Storage contract for notes.

use crate::note::Note;
use async_trait::async_trait;
use notekeep_core::{NoteId, StoreError, UserId};
use rootcause::Report;

/// Durable note storage.
///
/// Every read and delete takes the owner as part of the key; there is no way
/// to reach a note without naming its owner.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Lists an owner's notes, newest first.
    ///
    /// Notes created at the same instant are ordered by insertion, latest
    /// first, so the result is a total order.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Note>, Report<StoreError>>;

    /// Persists a new note.
    async fn insert(&self, note: &Note) -> Result<(), Report<StoreError>>;

    /// Deletes the note `id` if it is owned by `owner`.
    ///
    /// Returns false when no such owned note exists.
    async fn delete_owned(&self, owner: UserId, id: NoteId) -> Result<bool, Report<StoreError>>;
}
