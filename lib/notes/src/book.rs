//! Owner-scoped note operations.

use crate::error::NoteError;
use crate::note::{Note, NoteText};
use crate::repository::NoteRepository;
use notekeep_core::{NoteId, UserId};
use std::sync::Arc;

/// The note operations available to an authenticated owner.
#[derive(Clone)]
pub struct NoteBook {
    repository: Arc<dyn NoteRepository>,
}

impl NoteBook {
    pub fn new(repository: Arc<dyn NoteRepository>) -> Self {
        Self { repository }
    }

    /// Lists the owner's notes, newest first.
    pub async fn list(&self, owner: UserId) -> Result<Vec<Note>, NoteError> {
        Ok(self.repository.list_for_owner(owner).await?)
    }

    /// Adds a note with the trimmed `raw` text.
    ///
    /// # Errors
    ///
    /// `NoteError::EmptyText` if nothing is left after trimming; nothing is
    /// stored in that case.
    pub async fn add(&self, owner: UserId, raw: &str) -> Result<Note, NoteError> {
        let text = NoteText::parse(raw)?;
        let note = Note::new(owner, text);
        self.repository.insert(&note).await?;

        tracing::debug!(owner = %owner, note_id = %note.id(), "Added note");
        Ok(note)
    }

    /// Removes one of the owner's notes.
    ///
    /// # Errors
    ///
    /// `NoteError::NotFound` if the note does not exist or is owned by
    /// someone else; the two cases are indistinguishable.
    pub async fn remove(&self, owner: UserId, id: NoteId) -> Result<(), NoteError> {
        if self.repository.delete_owned(owner, id).await? {
            tracing::debug!(owner = %owner, note_id = %id, "Removed note");
            Ok(())
        } else {
            Err(NoteError::not_found(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryNoteRepository;

    fn book() -> NoteBook {
        NoteBook::new(Arc::new(MemoryNoteRepository::new()))
    }

    fn texts(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.text().as_str()).collect()
    }

    #[tokio::test]
    async fn add_rejects_empty_text() {
        let book = book();
        let owner = UserId::new();

        assert!(matches!(book.add(owner, "").await, Err(NoteError::EmptyText)));
        assert!(matches!(book.add(owner, "   ").await, Err(NoteError::EmptyText)));
        assert!(book.list(owner).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn add_stores_trimmed_text() {
        let book = book();
        let owner = UserId::new();

        let note = book.add(owner, "  hello  ").await.expect("add");
        assert_eq!(note.text().as_str(), "hello");
        assert_eq!(note.owner(), owner);

        let listed = book.list(owner).await.expect("list");
        assert_eq!(texts(&listed), vec!["hello"]);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let book = book();
        let owner = UserId::new();

        for text in ["a", "b", "c"] {
            book.add(owner, text).await.expect("add");
        }

        let listed = book.list(owner).await.expect("list");
        assert_eq!(texts(&listed), vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn list_never_returns_other_owners_notes() {
        let book = book();
        let alice = UserId::new();
        let bob = UserId::new();

        book.add(alice, "alice 1").await.expect("add");
        book.add(bob, "bob 1").await.expect("add");
        book.add(alice, "alice 2").await.expect("add");
        book.add(bob, "bob 2").await.expect("add");

        let listed = book.list(alice).await.expect("list");
        assert_eq!(texts(&listed), vec!["alice 2", "alice 1"]);
        assert!(listed.iter().all(|n| n.owner() == alice));
    }

    #[tokio::test]
    async fn remove_own_note() {
        let book = book();
        let owner = UserId::new();
        let note = book.add(owner, "temp").await.expect("add");

        book.remove(owner, note.id()).await.expect("remove");
        assert!(book.list(owner).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn remove_foreign_note_is_not_found_and_keeps_it() {
        let book = book();
        let alice = UserId::new();
        let bob = UserId::new();
        let bobs = book.add(bob, "bob's").await.expect("add");

        let result = book.remove(alice, bobs.id()).await;
        assert!(matches!(result, Err(NoteError::NotFound { .. })));

        let listed = book.list(bob).await.expect("list");
        assert_eq!(texts(&listed), vec!["bob's"]);
    }

    #[tokio::test]
    async fn remove_unknown_note_is_not_found() {
        let book = book();
        let result = book.remove(UserId::new(), NoteId::new()).await;
        assert!(matches!(result, Err(NoteError::NotFound { .. })));
    }
}
