//! Cookie attributes for the session and login-state cookies.
//!
//! Production serves the API and the browser client from different sites, so
//! cookies must be `Secure` with `SameSite=None` to be sent on credentialed
//! cross-origin requests. Development runs over plain HTTP and uses `Lax`.

use axum_extra::extract::cookie::{Cookie, Key, SameSite};
use notekeep_platform_access::SessionId;
use time::Duration as TimeDuration;

use crate::config::Environment;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// Login-state cookie name (CSRF token, PKCE verifier and nonce).
pub const LOGIN_STATE_COOKIE: &str = "login_state";

/// How long a login may take between redirect and callback.
const LOGIN_STATE_MINUTES: i64 = 10;

/// Builds cookies with attributes chosen for the deployment environment.
#[derive(Debug, Clone, Copy)]
pub struct CookiePolicy {
    secure: bool,
    same_site: SameSite,
    session_max_age: TimeDuration,
}

impl CookiePolicy {
    /// Creates the policy for `environment`. Session cookies live as long as
    /// the server-side session.
    #[must_use]
    pub fn new(environment: Environment, session_duration: chrono::Duration) -> Self {
        let (secure, same_site) = if environment.is_production() {
            (true, SameSite::None)
        } else {
            (false, SameSite::Lax)
        };
        Self {
            secure,
            same_site,
            session_max_age: TimeDuration::seconds(session_duration.num_seconds()),
        }
    }

    /// Cookie carrying the session handle.
    #[must_use]
    pub fn session(&self, id: &SessionId) -> Cookie<'static> {
        self.build(SESSION_COOKIE, id.as_str().to_string(), self.session_max_age)
    }

    /// Cookie carrying the encoded pending login.
    #[must_use]
    pub fn login_state(&self, value: String) -> Cookie<'static> {
        self.build(
            LOGIN_STATE_COOKIE,
            value,
            TimeDuration::minutes(LOGIN_STATE_MINUTES),
        )
    }

    /// Cookie that clears `name` on the client.
    #[must_use]
    pub fn removal(&self, name: &'static str) -> Cookie<'static> {
        self.build(name, String::new(), TimeDuration::ZERO)
    }

    fn build(&self, name: &'static str, value: String, max_age: TimeDuration) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(max_age)
            .build()
    }
}

/// Derives the cookie signing key from the configured secret.
///
/// The secret must be at least 32 bytes; `ServerConfig::validate` enforces
/// this before the key is derived.
#[must_use]
pub fn signing_key(secret: &str) -> Key {
    Key::derive_from(secret.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_session_cookie_is_cross_site() {
        let policy = CookiePolicy::new(Environment::Production, chrono::Duration::days(7));
        let cookie = policy.session(&SessionId::new("sess_abc".to_string()));

        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.value(), "sess_abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(TimeDuration::days(7)));
    }

    #[test]
    fn development_session_cookie_is_lax() {
        let policy = CookiePolicy::new(Environment::Development, chrono::Duration::days(7));
        let cookie = policy.session(&SessionId::new("sess_abc".to_string()));

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn login_state_cookie_is_short_lived() {
        let policy = CookiePolicy::new(Environment::Development, chrono::Duration::days(7));
        let cookie = policy.login_state("state".to_string());

        assert_eq!(cookie.name(), LOGIN_STATE_COOKIE);
        assert_eq!(cookie.max_age(), Some(TimeDuration::minutes(10)));
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let policy = CookiePolicy::new(Environment::Production, chrono::Duration::days(7));
        let cookie = policy.removal(SESSION_COOKIE);

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(TimeDuration::ZERO));
        assert_eq!(cookie.path(), Some("/"));
    }
}
