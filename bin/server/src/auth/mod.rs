//! Authentication for the notekeep server.
//!
//! This module provides:
//! - OIDC authentication against Google
//! - Postgres-backed users and sessions
//! - The `RequireUser` extractor guarding every `/api` route
//!
//! A session cookie is the only credential. It holds an opaque handle that
//! resolves to a server-side session, which in turn resolves to a user. All
//! note operations are scoped by the user found this way.

pub mod db;
pub mod middleware;
pub mod oidc;
pub mod routes;

pub use middleware::RequireUser;
pub use oidc::{OidcClient, OidcError};
pub use routes::{callback, login, logout};
