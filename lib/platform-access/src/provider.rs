//! The identity provider seam used by the login flow.

use crate::auth::{LoginInitiation, OidcClaims, PendingLogin};
use crate::error::AuthenticationError;
use async_trait::async_trait;
use rootcause::Report;

/// An external identity provider reached through a browser redirect.
///
/// The protocol behind this trait is opaque to the rest of the service: all
/// it needs is a URL to send the browser to and, after the callback, the
/// stable subject identifier and profile claims of whoever signed in.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Builds the authorization URL and the state to keep until the callback.
    fn begin_login(&self) -> LoginInitiation;

    /// Exchanges the callback's authorization code for verified claims.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails or the returned identity cannot
    /// be verified against `pending`.
    async fn complete_login(
        &self,
        code: &str,
        pending: &PendingLogin,
    ) -> Result<OidcClaims, Report<AuthenticationError>>;
}
