//! In-memory user directory and session store.
//!
//! These keep everything in process memory and lose it on restart, so they
//! are only suitable for tests and local experiments. Each operation holds a
//! single lock for its whole duration, which gives the same single-record
//! atomicity the Postgres repositories get from the database.

use crate::auth::OidcClaims;
use crate::directory::UserDirectory;
use crate::session::{Session, SessionId, SessionStore};
use crate::user::User;
use async_trait::async_trait;
use notekeep_core::{StoreError, UserId};
use rootcause::Report;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// User directory keyed by provider subject.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of users.
    pub async fn len(&self) -> usize {
        self.users.lock().await.len()
    }

    /// Returns true if no user has been created.
    pub async fn is_empty(&self) -> bool {
        self.users.lock().await.is_empty()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn upsert_by_subject(&self, claims: &OidcClaims) -> Result<User, Report<StoreError>> {
        let mut users = self.users.lock().await;
        let user = users
            .entry(claims.subject.clone())
            .or_insert_with(|| {
                User::new(
                    claims.subject.clone(),
                    claims.email.clone(),
                    claims.display_name.clone(),
                )
            })
            .clone();
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, Report<StoreError>> {
        let users = self.users.lock().await;
        Ok(users.values().find(|u| u.id() == id).cloned())
    }
}

/// Session store keyed by handle.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl MemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored sessions, expired or not.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Returns true if no session is stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: &Session) -> Result<(), Report<StoreError>> {
        self.sessions
            .lock()
            .await
            .insert(session.id().clone(), session.clone());
        Ok(())
    }

    async fn find(&self, id: &SessionId) -> Result<Option<Session>, Report<StoreError>> {
        Ok(self.sessions.lock().await.get(id).cloned())
    }

    async fn remove(&self, id: &SessionId) -> Result<(), Report<StoreError>> {
        self.sessions.lock().await.remove(id);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, Report<StoreError>> {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired());
        Ok((before - sessions.len()) as u64)
    }
}
