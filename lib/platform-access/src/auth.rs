//! Authentication context and login flow data.
//!
//! - `AuthenticatedUser`: the resolved session and user attached to a request
//! - `OidcClaims`: profile claims returned by the identity provider
//! - `LoginInitiation` / `PendingLogin`: what the login redirect must remember
//!   until the provider calls back

use crate::session::Session;
use crate::user::User;
use notekeep_core::UserId;
use serde::{Deserialize, Serialize};

/// The user a request is authenticated as.
///
/// Produced only by the auth gate. Handlers use `user_id()` to scope every
/// data operation.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The current session.
    session: Session,
    /// The user record the session resolved to.
    user: User,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user context.
    #[must_use]
    pub fn new(session: Session, user: User) -> Self {
        Self { session, user }
    }

    /// Returns the authenticated user's ID.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user.id()
    }

    /// Returns the current session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the user record.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }
}

/// Claims extracted from the identity provider's ID token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidcClaims {
    /// The subject claim (stable identifier of the provider account).
    pub subject: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Display name (optional, from name or preferred_username).
    pub display_name: Option<String>,
}

impl OidcClaims {
    /// Creates claims carrying only a subject.
    #[must_use]
    pub fn new(subject: String) -> Self {
        Self {
            subject,
            email: None,
            display_name: None,
        }
    }

    /// Sets the email claim.
    #[must_use]
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: Option<String>) -> Self {
        self.display_name = name;
        self
    }
}

/// State that must survive the round trip through the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLogin {
    /// State parameter for CSRF protection.
    pub csrf_token: String,
    /// PKCE code verifier.
    pub pkce_verifier: String,
    /// Nonce for ID token validation.
    pub nonce: String,
}

/// Login initiation data for redirecting to the identity provider.
#[derive(Debug, Clone)]
pub struct LoginInitiation {
    /// The URL to redirect the browser to.
    pub authorization_url: String,
    /// State to keep until the callback.
    pub pending: PendingLogin,
}
