//! Postgres persistence for notekeep.
//!
//! This module provides:
//! - The process-wide connection pool
//! - The note repository
//!
//! User and session repositories live in [`crate::auth::db`].

pub mod note;
pub mod pool;

pub use note::NoteRepository;
pub use pool::shared_pool;

use notekeep_core::StoreError;

/// Classifies a sqlx failure as a storage error.
pub(crate) fn store_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable {
                details: err.to_string(),
            }
        }
        other => StoreError::query(other),
    }
}
