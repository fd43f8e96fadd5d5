//! Session management for authenticated browsers.
//!
//! A session binds an opaque, unguessable handle to a local user ID until a
//! fixed expiry. Sessions are created after a successful login callback,
//! removed on logout, and treated as absent once expired. The handle is the
//! only thing the browser ever holds.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use notekeep_core::{StoreError, UserId};
use rootcause::Report;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default session lifetime in days.
pub const DEFAULT_SESSION_DAYS: i64 = 7;

/// Number of random bytes behind every session handle.
const HANDLE_BYTES: usize = 32;

/// Opaque session handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a session ID from an existing handle string.
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Generates a fresh handle from the operating system's random source.
    ///
    /// # Errors
    ///
    /// Returns an error if the random source is unavailable.
    pub fn generate() -> Result<Self, getrandom::Error> {
        let mut bytes = [0u8; HANDLE_BYTES];
        getrandom::fill(&mut bytes)?;
        Ok(Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes))))
    }

    /// Returns the session ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A browser's authenticated connection to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique handle for this session.
    id: SessionId,
    /// The authenticated user's ID.
    user_id: UserId,
    /// When the session was created.
    created_at: DateTime<Utc>,
    /// When the session expires.
    expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a new session for the given user, valid for `duration`.
    #[must_use]
    pub fn new(id: SessionId, user_id: UserId, duration: Duration) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            created_at: now,
            expires_at: now + duration,
        }
    }

    /// Creates a session with all fields specified.
    ///
    /// Use this when reconstituting a session from storage.
    #[must_use]
    pub fn with_all_fields(
        id: SessionId,
        user_id: UserId,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            created_at,
            expires_at,
        }
    }

    /// Returns the session ID.
    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the authenticated user's ID.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns when the session was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the session expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns true if the session has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Durable storage for sessions.
///
/// Implementations must survive process restarts in production; the service
/// may be re-instantiated between any two requests.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persists a new session.
    async fn insert(&self, session: &Session) -> Result<(), Report<StoreError>>;

    /// Finds a session by handle, expired or not.
    async fn find(&self, id: &SessionId) -> Result<Option<Session>, Report<StoreError>>;

    /// Removes a session. Removing an unknown handle is not an error.
    async fn remove(&self, id: &SessionId) -> Result<(), Report<StoreError>>;

    /// Removes every expired session, returning how many were removed.
    async fn purge_expired(&self) -> Result<u64, Report<StoreError>>;
}

/// Creates, resolves, and destroys sessions with a fixed lifetime.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    duration: Duration,
}

impl SessionManager {
    /// Creates a manager issuing sessions that last `duration`.
    pub fn new(store: Arc<dyn SessionStore>, duration: Duration) -> Self {
        Self { store, duration }
    }

    /// Returns the lifetime of newly created sessions.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Creates and persists a fresh session bound to `user_id`.
    pub async fn create(&self, user_id: UserId) -> Result<Session, Report<StoreError>> {
        let id = SessionId::generate().map_err(|e| StoreError::Unavailable {
            details: format!("random source: {e}"),
        })?;
        let session = Session::new(id, user_id, self.duration);
        self.store.insert(&session).await?;

        tracing::debug!(user_id = %user_id, expires_at = %session.expires_at(), "Created session");
        Ok(session)
    }

    /// Resolves a handle to its live session.
    ///
    /// Unknown and expired handles resolve to `None`. Expired sessions are
    /// removed as they are found.
    pub async fn resolve(&self, id: &SessionId) -> Result<Option<Session>, Report<StoreError>> {
        let Some(session) = self.store.find(id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            if let Err(e) = self.store.remove(id).await {
                tracing::warn!(error = %e, "Failed to remove expired session");
            }
            return Ok(None);
        }

        Ok(Some(session))
    }

    /// Destroys a session. Destroying an unknown handle is not an error.
    pub async fn destroy(&self, id: &SessionId) -> Result<(), Report<StoreError>> {
        self.store.remove(id).await
    }

    /// Removes every expired session.
    pub async fn purge_expired(&self) -> Result<u64, Report<StoreError>> {
        self.store.purge_expired().await
    }
}
