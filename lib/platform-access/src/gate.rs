//! The auth gate lookup.
//!
//! Every protected endpoint authenticates through `resolve_user`, which walks
//! cookie value -> session -> user explicitly instead of relying on state the
//! web framework injects. Any missing link means "not authenticated".

use crate::auth::AuthenticatedUser;
use crate::directory::UserDirectory;
use crate::session::{SessionId, SessionManager};
use notekeep_core::StoreError;
use rootcause::Report;

/// Resolves a session handle to the user it authenticates.
///
/// Returns `Ok(None)` when the handle is absent or empty, the session is
/// unknown or expired, or the session's user no longer exists.
///
/// # Errors
///
/// Returns an error only when the store itself fails.
pub async fn resolve_user(
    sessions: &SessionManager,
    users: &dyn UserDirectory,
    handle: Option<&str>,
) -> Result<Option<AuthenticatedUser>, Report<StoreError>> {
    let Some(handle) = handle.filter(|h| !h.is_empty()) else {
        return Ok(None);
    };

    let session_id = SessionId::from(handle);
    let Some(session) = sessions.resolve(&session_id).await? else {
        tracing::debug!("Session handle did not resolve");
        return Ok(None);
    };

    let Some(user) = users.find_by_id(session.user_id()).await? else {
        tracing::debug!(user_id = %session.user_id(), "Session refers to a missing user");
        return Ok(None);
    };

    Ok(Some(AuthenticatedUser::new(session, user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::OidcClaims;
    use crate::memory::{MemorySessionStore, MemoryUserDirectory};
    use crate::session::{Session, SessionStore};
    use chrono::Duration;
    use notekeep_core::UserId;
    use std::sync::Arc;

    struct Fixture {
        store: Arc<MemorySessionStore>,
        sessions: SessionManager,
        users: MemoryUserDirectory,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemorySessionStore::new());
        Fixture {
            sessions: SessionManager::new(store.clone(), Duration::days(7)),
            store,
            users: MemoryUserDirectory::new(),
        }
    }

    #[tokio::test]
    async fn absent_or_empty_handle_is_unauthenticated() {
        let f = fixture();

        assert!(resolve_user(&f.sessions, &f.users, None).await.expect("resolve").is_none());
        assert!(
            resolve_user(&f.sessions, &f.users, Some(""))
                .await
                .expect("resolve")
                .is_none()
        );
    }

    #[tokio::test]
    async fn live_session_resolves_to_its_user() {
        let f = fixture();
        let user = f
            .users
            .upsert_by_subject(&OidcClaims::new("sub_alice".to_string()))
            .await
            .expect("upsert");
        let session = f.sessions.create(user.id()).await.expect("create");

        let auth = resolve_user(&f.sessions, &f.users, Some(session.id().as_str()))
            .await
            .expect("resolve")
            .expect("authenticated");

        assert_eq!(auth.user_id(), user.id());
        assert_eq!(auth.session().id(), session.id());
    }

    #[tokio::test]
    async fn unknown_handle_is_unauthenticated() {
        let f = fixture();
        let auth = resolve_user(&f.sessions, &f.users, Some("sess_forged"))
            .await
            .expect("resolve");
        assert!(auth.is_none());
    }

    #[tokio::test]
    async fn expired_session_is_unauthenticated() {
        let f = fixture();
        let user = f
            .users
            .upsert_by_subject(&OidcClaims::new("sub_alice".to_string()))
            .await
            .expect("upsert");
        let expired = Session::new("sess_stale".into(), user.id(), Duration::seconds(-1));
        f.store.insert(&expired).await.expect("insert");

        let auth = resolve_user(&f.sessions, &f.users, Some("sess_stale"))
            .await
            .expect("resolve");
        assert!(auth.is_none());
    }

    #[tokio::test]
    async fn session_for_missing_user_is_unauthenticated() {
        let f = fixture();
        let session = f.sessions.create(UserId::new()).await.expect("create");

        let auth = resolve_user(&f.sessions, &f.users, Some(session.id().as_str()))
            .await
            .expect("resolve");
        assert!(auth.is_none());
    }

    #[tokio::test]
    async fn destroyed_session_no_longer_resolves() {
        let f = fixture();
        let user = f
            .users
            .upsert_by_subject(&OidcClaims::new("sub_alice".to_string()))
            .await
            .expect("upsert");
        let session = f.sessions.create(user.id()).await.expect("create");
        f.sessions.destroy(session.id()).await.expect("destroy");

        let auth = resolve_user(&f.sessions, &f.users, Some(session.id().as_str()))
            .await
            .expect("resolve");
        assert!(auth.is_none());
    }
}
