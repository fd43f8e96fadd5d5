//! In-memory note repository.
//!
//! Suitable for tests only: notes are lost on restart.

use crate::note::Note;
use crate::repository::NoteRepository;
use async_trait::async_trait;
use notekeep_core::{NoteId, StoreError, UserId};
use rootcause::Report;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Inner {
    next_seq: u64,
    notes: Vec<(u64, Note)>,
}

/// Note repository backed by a vector, with an insertion counter standing in
/// for the database sequence used as an ordering tie-breaker.
#[derive(Debug, Default)]
pub struct MemoryNoteRepository {
    inner: Mutex<Inner>,
}

impl MemoryNoteRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored notes across all owners.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.notes.len()
    }

    /// Returns true if no notes are stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.notes.is_empty()
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Note>, Report<StoreError>> {
        let inner = self.inner.lock().await;
        let mut owned: Vec<&(u64, Note)> =
            inner.notes.iter().filter(|(_, n)| n.owner() == owner).collect();
        owned.sort_by(|(a_seq, a), (b_seq, b)| {
            (b.created_at(), b_seq).cmp(&(a.created_at(), a_seq))
        });
        Ok(owned.into_iter().map(|(_, n)| n.clone()).collect())
    }

    async fn insert(&self, note: &Note) -> Result<(), Report<StoreError>> {
        let mut inner = self.inner.lock().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.notes.push((seq, note.clone()));
        Ok(())
    }

    async fn delete_owned(&self, owner: UserId, id: NoteId) -> Result<bool, Report<StoreError>> {
        let mut inner = self.inner.lock().await;
        let before = inner.notes.len();
        inner
            .notes
            .retain(|(_, n)| !(n.id() == id && n.owner() == owner));
        Ok(inner.notes.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::NoteText;
    use chrono::Utc;

    #[tokio::test]
    async fn same_instant_notes_order_by_insertion() {
        let repo = MemoryNoteRepository::new();
        let owner = UserId::new();
        let at = Utc::now();

        for text in ["first", "second", "third"] {
            let note = Note::with_all_fields(
                NoteId::new(),
                owner,
                NoteText::parse(text).expect("valid"),
                at,
                at,
            );
            repo.insert(&note).await.expect("insert");
        }

        let listed = repo.list_for_owner(owner).await.expect("list");
        let texts: Vec<_> = listed.iter().map(|n| n.text().as_str()).collect();
        assert_eq!(texts, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn delete_requires_matching_owner() {
        let repo = MemoryNoteRepository::new();
        let owner = UserId::new();
        let note = Note::new(owner, NoteText::parse("mine").expect("valid"));
        repo.insert(&note).await.expect("insert");

        assert!(!repo.delete_owned(UserId::new(), note.id()).await.expect("delete"));
        assert_eq!(repo.len().await, 1);

        assert!(repo.delete_owned(owner, note.id()).await.expect("delete"));
        assert!(repo.is_empty().await);
    }
}
