//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from environment variables. Nested keys use
//! `__` as the separator, so `SESSION__SECRET` sets `session.secret`.
//!
//! See [`OidcConfig`](notekeep_platform_access::OidcConfig) for
//! OIDC authentication configuration.

use notekeep_platform_access::{DEFAULT_SESSION_DAYS, OidcConfig};
use serde::Deserialize;
use std::fmt;

/// Minimum length of the cookie signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Longest accepted session lifetime, in days.
pub const MAX_SESSION_DAYS: i64 = 3650;

/// Server configuration composed from library configs.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// PostgreSQL database connection URL.
    pub database_url: String,

    /// Deployment environment. Controls cookie security attributes.
    #[serde(default)]
    pub environment: Environment,

    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Origin of the browser client, used for CORS and post-login redirects.
    #[serde(default = "default_frontend_origin")]
    pub frontend_origin: String,

    /// Session configuration.
    pub session: SessionConfig,

    /// OIDC authentication configuration.
    pub oidc: OidcConfig,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Returns true when running in production.
    #[must_use]
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session-related configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret used to sign cookies. At least 32 bytes.
    pub secret: String,

    /// Session duration in days.
    #[serde(default = "default_session_duration_days")]
    pub duration_days: i64,

    /// Interval between session cleanup runs, in seconds.
    #[serde(default = "default_cleanup_interval_seconds")]
    pub cleanup_interval_seconds: u64,
}

fn default_bind_address() -> String {
    "0.0.0.0:3050".to_string()
}

fn default_frontend_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_session_duration_days() -> i64 {
    DEFAULT_SESSION_DAYS
}

fn default_cleanup_interval_seconds() -> u64 {
    300
}

impl SessionConfig {
    /// Returns the session lifetime.
    #[must_use]
    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::days(self.duration_days)
    }
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let config: Self = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks constraints that deserialization alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` describing the first violated constraint.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.session.secret.len() < MIN_SECRET_LEN {
            return Err(config::ConfigError::Message(format!(
                "session.secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        if !(1..=MAX_SESSION_DAYS).contains(&self.session.duration_days) {
            return Err(config::ConfigError::Message(format!(
                "session.duration_days must be between 1 and {MAX_SESSION_DAYS}"
            )));
        }
        if self.session.cleanup_interval_seconds == 0 {
            return Err(config::ConfigError::Message(
                "session.cleanup_interval_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
