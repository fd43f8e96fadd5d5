//! Authentication extractor for Axum.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::SignedCookieJar;
use notekeep_platform_access::{AuthenticatedUser, resolve_user};

use crate::app::AppState;
use crate::cookies::SESSION_COOKIE;
use crate::error::ApiError;

/// Extractor for requiring an authenticated user.
///
/// Rejects with 401 before the handler runs if the request carries no valid
/// session cookie, so handlers never see an unauthenticated request.
pub struct RequireUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let jar = SignedCookieJar::from_headers(&parts.headers, app_state.cookie_key.clone());

        // A cookie with a bad signature is treated as absent.
        let handle = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string());

        let user = resolve_user(
            &app_state.sessions,
            app_state.users.as_ref(),
            handle.as_deref(),
        )
        .await
        .map_err(ApiError::storage)?
        .ok_or(ApiError::NotAuthenticated)?;

        Ok(RequireUser(user))
    }
}
