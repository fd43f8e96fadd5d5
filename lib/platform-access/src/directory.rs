//! The user directory contract.

use crate::auth::OidcClaims;
use crate::user::User;
use async_trait::async_trait;
use notekeep_core::{StoreError, UserId};
use rootcause::Report;

/// Maps identity provider subjects to local user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the user for `claims.subject`, creating it on first sight.
    ///
    /// An existing user is returned unchanged: profile claims are only
    /// recorded when the user is created. Creation is a single atomic
    /// insert-if-absent, so concurrent first logins for one subject converge
    /// on a single user.
    async fn upsert_by_subject(&self, claims: &OidcClaims) -> Result<User, Report<StoreError>>;

    /// Finds a user by internal ID.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, Report<StoreError>>;
}
