//! Shared harness for router tests: in-memory stores, a scripted identity
//! provider, and helpers for carrying cookies between requests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use notekeep_core::{NoteId, StoreError, UserId};
use notekeep_notes::{Note, NoteBook, NoteRepository, memory::MemoryNoteRepository};
use notekeep_platform_access::{
    AuthenticationError, IdentityProvider, LoginInitiation, OidcClaims, PendingLogin,
    SessionManager, User, UserDirectory,
    memory::{MemorySessionStore, MemoryUserDirectory},
};
use notekeep_server::{
    app::{AppState, router},
    config::Environment,
    cookies::{self, CookiePolicy},
};
use rootcause::Report;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

pub const FRONTEND: &str = "http://localhost:3000";
pub const CSRF_TOKEN: &str = "csrf-token";
const SECRET: &str = "test-secret-that-is-long-enough-for-signing";

/// Identity provider that accepts codes of the form `code-<subject>`.
pub struct FakeProvider;

#[async_trait]
impl IdentityProvider for FakeProvider {
    fn begin_login(&self) -> LoginInitiation {
        LoginInitiation {
            authorization_url: format!("https://idp.test/authorize?state={CSRF_TOKEN}"),
            pending: PendingLogin {
                csrf_token: CSRF_TOKEN.to_string(),
                pkce_verifier: "verifier".to_string(),
                nonce: "nonce".to_string(),
            },
        }
    }

    async fn complete_login(
        &self,
        code: &str,
        pending: &PendingLogin,
    ) -> Result<OidcClaims, Report<AuthenticationError>> {
        if pending.pkce_verifier != "verifier" {
            return Err(AuthenticationError::TokenExchange {
                reason: "bad verifier".to_string(),
            }
            .into());
        }
        let subject = code
            .strip_prefix("code-")
            .ok_or_else(|| AuthenticationError::TokenExchange {
                reason: format!("unknown code {code}"),
            })?;
        Ok(OidcClaims::new(subject.to_string())
            .with_email(Some(format!("{subject}@example.com")))
            .with_display_name(Some(subject.to_string())))
    }
}

/// Note repository that counts every call it receives.
#[derive(Default)]
pub struct CountingNoteRepository {
    inner: MemoryNoteRepository,
    calls: AtomicUsize,
}

impl CountingNoteRepository {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.inner.len().await
    }
}

#[async_trait]
impl NoteRepository for CountingNoteRepository {
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Note>, Report<StoreError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_for_owner(owner).await
    }

    async fn insert(&self, note: &Note) -> Result<(), Report<StoreError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(note).await
    }

    async fn delete_owned(&self, owner: UserId, id: NoteId) -> Result<bool, Report<StoreError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_owned(owner, id).await
    }
}

/// User directory whose store is down.
pub struct UnavailableUserDirectory;

#[async_trait]
impl UserDirectory for UnavailableUserDirectory {
    async fn upsert_by_subject(&self, _claims: &OidcClaims) -> Result<User, Report<StoreError>> {
        Err(StoreError::Unavailable {
            details: "database offline".to_string(),
        }
        .into())
    }

    async fn find_by_id(&self, _id: UserId) -> Result<Option<User>, Report<StoreError>> {
        Err(StoreError::Unavailable {
            details: "database offline".to_string(),
        }
        .into())
    }
}

pub struct TestApp {
    router: Router,
    pub users: Arc<MemoryUserDirectory>,
    pub sessions: Arc<MemorySessionStore>,
    pub notes: Arc<CountingNoteRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_environment(Environment::Development)
    }

    pub fn with_environment(environment: Environment) -> Self {
        let users = Arc::new(MemoryUserDirectory::new());
        Self::build(environment, users.clone(), users)
    }

    /// An app whose user directory always fails.
    pub fn with_unavailable_users() -> Self {
        Self::build(
            Environment::Development,
            Arc::new(MemoryUserDirectory::new()),
            Arc::new(UnavailableUserDirectory),
        )
    }

    fn build(
        environment: Environment,
        users: Arc<MemoryUserDirectory>,
        directory: Arc<dyn UserDirectory>,
    ) -> Self {
        let sessions = Arc::new(MemorySessionStore::new());
        let notes = Arc::new(CountingNoteRepository::default());
        let duration = chrono::Duration::days(7);

        let state = AppState {
            users: directory,
            sessions: SessionManager::new(sessions.clone(), duration),
            notes: NoteBook::new(notes.clone()),
            identity: Arc::new(FakeProvider),
            cookies: CookiePolicy::new(environment, duration),
            cookie_key: cookies::signing_key(SECRET),
            frontend_origin: FRONTEND.to_string(),
            environment,
        };

        Self {
            router: router(state),
            users,
            sessions,
            notes,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(request("GET", uri, cookie, Body::empty())).await
    }

    /// Runs the login redirect and callback for `subject`, returning the
    /// session cookie pair to send on later requests.
    pub async fn login(&self, subject: &str) -> String {
        let response = self.callback(&format!("code=code-{subject}&state={CSRF_TOKEN}")).await;
        assert_eq!(response.headers()[header::LOCATION], format!("{FRONTEND}/notes"));
        cookie_pair(&response, cookies::SESSION_COOKIE).expect("session cookie")
    }

    /// Starts a login and calls back with `query`, carrying the login-state
    /// cookie from the first step.
    pub async fn callback(&self, query: &str) -> Response<Body> {
        self.callback_with_session(query, None).await
    }

    /// Like [`TestApp::callback`], also sending an existing session cookie.
    pub async fn callback_with_session(&self, query: &str, session: Option<&str>) -> Response<Body> {
        let start = self.get("/auth/google", None).await;
        let state = cookie_pair(&start, cookies::LOGIN_STATE_COOKIE).expect("login state cookie");
        let cookie = match session {
            Some(session) => format!("{state}; {session}"),
            None => state,
        };
        self.get(&format!("/auth/google/callback?{query}"), Some(&cookie))
            .await
    }
}

pub fn request(method: &str, uri: &str, cookie: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(body).expect("valid request")
}

pub fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut request = request(method, uri, cookie, Body::from(body.to_string()));
    request.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    request
}

/// All `Set-Cookie` headers of a response.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// The `name=value` pair of a cookie the response sets, ignoring removals.
pub fn cookie_pair(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies(response)
        .into_iter()
        .filter(|c| c.starts_with(&prefix) && !c.contains("Max-Age=0"))
        .find_map(|c| c.split(';').next().map(str::to_string))
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
