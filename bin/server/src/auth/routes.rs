//! Authentication routes for login, callback, and logout.

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_extra::extract::SignedCookieJar;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use notekeep_platform_access::{
    AuthenticationError, IdentityProvider, OidcClaims, PendingLogin, SessionId,
};
use rootcause::Report;
use serde::Deserialize;

use crate::app::AppState;
use crate::cookies::{LOGIN_STATE_COOKIE, SESSION_COOKIE};
use crate::error::ApiError;

/// Query parameters for the OIDC callback.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Initiates the OIDC login flow by redirecting to the identity provider.
pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, ApiError> {
    let initiation = state.identity.begin_login();

    let encoded = encode_pending(&initiation.pending)?;
    let jar = jar.add(state.cookies.login_state(encoded));

    Ok((jar, found(&initiation.authorization_url)).into_response())
}

/// Handles the OIDC callback after the user authenticates with the identity provider.
///
/// Any failure of the provider round trip sends the browser back to the client
/// with `?error=auth`. Storage failures after a successful round trip are 500s.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    jar: SignedCookieJar,
) -> Result<Response, ApiError> {
    let pending = jar
        .get(LOGIN_STATE_COOKIE)
        .and_then(|cookie| decode_pending(cookie.value()));
    let jar = jar.add(state.cookies.removal(LOGIN_STATE_COOKIE));

    let claims = match verify_callback(state.identity.as_ref(), query, pending).await {
        Ok(claims) => claims,
        Err(report) => {
            tracing::warn!(error = %report, "Login failed");
            let target = format!("{}/?error=auth", state.frontend_origin);
            return Ok((jar, found(&target)).into_response());
        }
    };

    let user = state
        .users
        .upsert_by_subject(&claims)
        .await
        .map_err(ApiError::storage)?;

    // Logging in over an existing session replaces it.
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let previous = SessionId::new(cookie.value().to_string());
        state
            .sessions
            .destroy(&previous)
            .await
            .map_err(ApiError::storage)?;
        tracing::debug!("Previous session destroyed");
    }

    let session = state
        .sessions
        .create(user.id())
        .await
        .map_err(ApiError::storage)?;

    tracing::info!(user_id = %user.id(), "User logged in");

    let jar = jar.add(state.cookies.session(session.id()));
    let target = format!("{}/notes", state.frontend_origin);
    Ok((jar, found(&target)).into_response())
}

/// Logs out the user by deleting their session.
pub async fn logout(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, ApiError> {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let session_id = SessionId::new(cookie.value().to_string());
        state
            .sessions
            .destroy(&session_id)
            .await
            .map_err(ApiError::storage)?;
        tracing::debug!("Session destroyed");
    }

    let jar = jar.add(state.cookies.removal(SESSION_COOKIE));
    Ok((jar, found(&state.frontend_origin)).into_response())
}

/// Checks the callback against the pending login and completes the exchange.
async fn verify_callback(
    identity: &dyn IdentityProvider,
    query: CallbackQuery,
    pending: Option<PendingLogin>,
) -> Result<OidcClaims, Report<AuthenticationError>> {
    if let Some(reason) = query.error {
        return Err(AuthenticationError::ProviderDenied { reason }.into());
    }

    let code = query
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AuthenticationError::MissingParameter {
            name: "code".to_string(),
        })?;
    let returned_state = query
        .state
        .ok_or_else(|| AuthenticationError::MissingParameter {
            name: "state".to_string(),
        })?;
    let pending = pending.ok_or(AuthenticationError::MissingLoginState)?;

    if returned_state != pending.csrf_token {
        return Err(AuthenticationError::StateMismatch.into());
    }

    identity.complete_login(&code, &pending).await
}

fn encode_pending(pending: &PendingLogin) -> Result<String, ApiError> {
    let json = serde_json::to_vec(pending).map_err(ApiError::internal)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_pending(value: &str) -> Option<PendingLogin> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// 302 Found. `Redirect::to` answers 303.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
