//! Error types for the platform-access crate.
//!
//! Errors are designed for layered context using rootcause. Every variant of
//! `AuthenticationError` is handled the same way by the login callback: the
//! browser is sent back to the client with an error marker and no session or
//! user is created. The variants exist so the server log says what happened.

use std::fmt;

/// Errors from the identity provider login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    /// The provider reported an error instead of an authorization code
    /// (for example the user declined consent).
    ProviderDenied { reason: String },
    /// A required callback parameter was absent.
    MissingParameter { name: String },
    /// The pending login state cookie was absent or could not be decoded.
    MissingLoginState,
    /// The callback state did not match the pending login state.
    StateMismatch,
    /// Exchanging the authorization code with the provider failed.
    TokenExchange { reason: String },
    /// The ID token returned by the provider failed validation.
    InvalidToken { reason: String },
    /// A required claim was missing from the ID token.
    MissingClaim { claim: String },
}

impl fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProviderDenied { reason } => {
                write!(f, "identity provider denied the login: {reason}")
            }
            Self::MissingParameter { name } => {
                write!(f, "missing callback parameter: {name}")
            }
            Self::MissingLoginState => {
                write!(f, "no pending login state")
            }
            Self::StateMismatch => {
                write!(f, "login state mismatch")
            }
            Self::TokenExchange { reason } => {
                write!(f, "token exchange failed: {reason}")
            }
            Self::InvalidToken { reason } => {
                write!(f, "invalid token: {reason}")
            }
            Self::MissingClaim { claim } => {
                write!(f, "missing required claim: {claim}")
            }
        }
    }
}

impl std::error::Error for AuthenticationError {}
