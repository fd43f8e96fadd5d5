//! Router and shared application state.

use axum::{
    Router,
    extract::FromRef,
    http::{HeaderValue, Method, header},
    routing::{delete, get},
};
use axum_extra::extract::cookie::Key;
use notekeep_notes::NoteBook;
use notekeep_platform_access::{IdentityProvider, SessionManager, UserDirectory};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Environment;
use crate::cookies::CookiePolicy;
use crate::{auth, health, notes, user};

/// Shared application state.
///
/// Cloned into every request; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    /// User records keyed by provider subject.
    pub users: Arc<dyn UserDirectory>,
    /// Session lifecycle.
    pub sessions: SessionManager,
    /// Owner-scoped note operations.
    pub notes: NoteBook,
    /// Identity provider for the login flow.
    pub identity: Arc<dyn IdentityProvider>,
    /// Cookie attributes for this environment.
    pub cookies: CookiePolicy,
    /// Key signing every cookie the server sets.
    pub cookie_key: Key,
    /// Origin of the browser client.
    pub frontend_origin: String,
    /// Deployment environment.
    pub environment: Environment,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.frontend_origin);

    Router::new()
        .route("/", get(health::status))
        .route("/_health", get(health::health))
        // Auth routes
        .route("/auth/google", get(auth::login))
        .route("/auth/google/callback", get(auth::callback))
        .route("/auth/logout", get(auth::logout))
        // API routes
        .route("/api/me", get(user::me))
        .route("/api/notes", get(notes::list).post(notes::add))
        .route("/api/notes/{id}", delete(notes::remove))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the browser client: its origin only, with credentials.
fn cors_layer(frontend_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    match HeaderValue::from_str(frontend_origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            tracing::warn!(origin = frontend_origin, error = %e, "Invalid frontend origin; cross-origin requests disabled");
            layer
        }
    }
}
