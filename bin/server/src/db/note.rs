//! Postgres note repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use notekeep_core::{NoteId, StoreError, UserId};
use notekeep_notes::{Note, NoteText};
use rootcause::Report;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

use super::store_error;

/// Row type for note queries.
#[derive(FromRow)]
struct NoteRow {
    id: String,
    user_id: String,
    text: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl NoteRow {
    fn try_into_note(self) -> Result<Note, StoreError> {
        let id = NoteId::from_str(&self.id)
            .map_err(|e| StoreError::decode(format!("invalid note id '{}': {}", self.id, e)))?;
        let owner = UserId::from_str(&self.user_id).map_err(|e| {
            StoreError::decode(format!("invalid user id '{}': {}", self.user_id, e))
        })?;
        let text = NoteText::parse(&self.text)
            .map_err(|e| StoreError::decode(format!("note '{}': {}", self.id, e)))?;
        Ok(Note::with_all_fields(
            id,
            owner,
            text,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Repository for note operations.
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    /// Creates a new note repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl notekeep_notes::NoteRepository for NoteRepository {
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Note>, Report<StoreError>> {
        let rows: Vec<NoteRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, text, created_at, updated_at
            FROM notes
            WHERE user_id = $1
            ORDER BY created_at DESC, seq DESC
            "#,
        )
        .bind(owner.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(store_error)?;

        let mut notes = Vec::with_capacity(rows.len());
        for row in rows {
            notes.push(row.try_into_note()?);
        }
        Ok(notes)
    }

    async fn insert(&self, note: &Note) -> Result<(), Report<StoreError>> {
        sqlx::query(
            r#"
            INSERT INTO notes (id, user_id, text, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(note.id().to_string())
        .bind(note.owner().to_string())
        .bind(note.text().as_str())
        .bind(note.created_at())
        .bind(note.updated_at())
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn delete_owned(&self, owner: UserId, id: NoteId) -> Result<bool, Report<StoreError>> {
        let result = sqlx::query(
            r#"
            DELETE FROM notes
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.to_string())
        .bind(owner.to_string())
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}
