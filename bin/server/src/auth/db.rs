//! Database repositories for users and sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use notekeep_core::{StoreError, UserId};
use notekeep_platform_access::{
    OidcClaims, Session, SessionId, SessionStore, User, UserDirectory,
};
use rootcause::Report;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

use crate::db::store_error;

/// Row type for user queries.
#[derive(FromRow)]
struct UserRow {
    id: String,
    subject: String,
    email: Option<String>,
    display_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn try_into_user(self) -> Result<User, StoreError> {
        let id = UserId::from_str(&self.id)
            .map_err(|e| StoreError::decode(format!("invalid user id '{}': {}", self.id, e)))?;
        Ok(User::with_all_fields(
            id,
            self.subject,
            self.email,
            self.display_name,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Row type for session queries.
#[derive(FromRow)]
struct SessionRow {
    id: String,
    user_id: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SessionRow {
    fn try_into_session(self) -> Result<Session, StoreError> {
        let user_id = UserId::from_str(&self.user_id).map_err(|e| {
            StoreError::decode(format!("invalid user id '{}': {}", self.user_id, e))
        })?;
        Ok(Session::with_all_fields(
            SessionId::new(self.id),
            user_id,
            self.created_at,
            self.expires_at,
        ))
    }
}

/// Repository for user operations.
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>, Report<StoreError>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, subject, email, display_name, created_at, updated_at
            FROM users
            WHERE subject = $1
            "#,
        )
        .bind(subject)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        match row {
            Some(r) => Ok(Some(r.try_into_user()?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn upsert_by_subject(&self, claims: &OidcClaims) -> Result<User, Report<StoreError>> {
        let candidate = User::new(
            claims.subject.clone(),
            claims.email.clone(),
            claims.display_name.clone(),
        );

        // The unique index on subject settles concurrent first logins; the
        // loser reads back the winner's row.
        let inserted: Option<UserRow> = sqlx::query_as(
            r#"
            INSERT INTO users (id, subject, email, display_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (subject) DO NOTHING
            RETURNING id, subject, email, display_name, created_at, updated_at
            "#,
        )
        .bind(candidate.id().to_string())
        .bind(candidate.subject())
        .bind(candidate.email())
        .bind(candidate.display_name())
        .bind(candidate.created_at())
        .bind(candidate.updated_at())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        if let Some(row) = inserted {
            let user = row.try_into_user()?;
            tracing::info!(user_id = %user.id(), "Created user");
            return Ok(user);
        }

        self.find_by_subject(&claims.subject)
            .await?
            .ok_or_else(|| {
                StoreError::query(format!(
                    "user with subject '{}' vanished after conflicting insert",
                    claims.subject
                ))
                .into()
            })
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, Report<StoreError>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, subject, email, display_name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        match row {
            Some(r) => Ok(Some(r.try_into_user()?)),
            None => Ok(None),
        }
    }
}

/// Repository for session operations.
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Creates a new session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), Report<StoreError>> {
        sqlx::query(
            r#"
            INSERT INTO sessions (id, user_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(session.id().as_str())
        .bind(session.user_id().to_string())
        .bind(session.created_at())
        .bind(session.expires_at())
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn find(&self, id: &SessionId) -> Result<Option<Session>, Report<StoreError>> {
        let row: Option<SessionRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, created_at, expires_at
            FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        match row {
            Some(r) => Ok(Some(r.try_into_session()?)),
            None => Ok(None),
        }
    }

    async fn remove(&self, id: &SessionId) -> Result<(), Report<StoreError>> {
        sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, Report<StoreError>> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE expires_at <= NOW()
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(result.rows_affected())
    }
}
