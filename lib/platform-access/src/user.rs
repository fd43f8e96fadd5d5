//! User domain type.
//!
//! A User is the local record for one identity provider account. Users are
//! identified externally by the provider's subject claim and internally by a
//! generated `UserId`, which is what sessions and notes refer to.

use chrono::{DateTime, Utc};
use notekeep_core::UserId;
use serde::{Deserialize, Serialize};

/// Represents a person who has signed in at least once.
///
/// Users are created lazily on the first successful login for a subject and
/// are never deleted. Profile fields are captured on creation and are not
/// re-synced on later logins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Internal user ID.
    id: UserId,
    /// Subject claim from the identity provider. Unique across users.
    subject: String,
    /// Email address from the provider's email claim, if shared.
    email: Option<String>,
    /// Display name from the provider's name claim, if shared.
    display_name: Option<String>,
    /// When the user record was created.
    created_at: DateTime<Utc>,
    /// When the user record was last updated.
    updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user for a subject seen for the first time.
    #[must_use]
    pub fn new(subject: String, email: Option<String>, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            subject,
            email,
            display_name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Creates a user with all fields specified.
    ///
    /// Use this when reconstituting a user from storage.
    #[must_use]
    pub fn with_all_fields(
        id: UserId,
        subject: String,
        email: Option<String>,
        display_name: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            subject,
            email,
            display_name,
            created_at,
            updated_at,
        }
    }

    /// Returns the user's internal ID.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the provider subject claim.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the user's email address, if available.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the user's display name, if available.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns when the user was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the user was last updated.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
