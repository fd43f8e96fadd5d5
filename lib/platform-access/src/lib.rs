//! Identity, sessions, and request authentication for notekeep.
//!
//! This crate provides:
//! - User records keyed by the identity provider's subject (`User`)
//! - The user directory contract with first-write-wins upserts (`UserDirectory`)
//! - Durable session handles with fixed expiry (`Session`, `SessionStore`, `SessionManager`)
//! - The identity provider seam used by the login flow (`IdentityProvider`)
//! - The auth gate lookup from cookie value to user (`resolve_user`)
//! - In-memory stores for tests and local experiments (`memory`)
//!
//! # Example
//!
//! ```
//! use notekeep_platform_access::{OidcClaims, UserDirectory, memory::MemoryUserDirectory};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let directory = MemoryUserDirectory::new();
//! let claims = OidcClaims::new("108234".to_string())
//!     .with_email(Some("alice@example.com".to_string()));
//!
//! let first = directory.upsert_by_subject(&claims).await.unwrap();
//! let again = directory.upsert_by_subject(&claims).await.unwrap();
//! assert_eq!(first.id(), again.id());
//! # });
//! ```

pub mod auth;
pub mod directory;
pub mod error;
pub mod gate;
pub mod memory;
pub mod oidc;
pub mod provider;
pub mod session;
pub mod user;

// Re-export main types at crate root
pub use auth::{AuthenticatedUser, LoginInitiation, OidcClaims, PendingLogin};
pub use directory::UserDirectory;
pub use error::AuthenticationError;
pub use gate::resolve_user;
pub use oidc::OidcConfig;
pub use provider::IdentityProvider;
pub use session::{DEFAULT_SESSION_DAYS, Session, SessionId, SessionManager, SessionStore};
pub use user::User;
