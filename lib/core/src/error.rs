//! Error handling foundation for notekeep.
//!
//! This module provides the `Result` type alias using rootcause and the
//! storage error shared by every repository trait. Each crate defines its own
//! domain-specific error types, and storage failures travel up the stack as
//! `Report<StoreError>`.

use rootcause::Report;
use std::fmt;

/// A Result type alias using rootcause's Report for error handling.
///
/// Each layer adds its own context via `.context()` as errors propagate.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

/// Failures of the durable store backing users, sessions, and notes.
///
/// Storage errors are never caused by the caller's input. They are logged
/// server-side and surfaced to clients as a generic internal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached.
    Unavailable { details: String },
    /// A query or write was rejected by the store.
    Query { details: String },
    /// A stored row could not be decoded into a domain value.
    Decode { details: String },
}

impl StoreError {
    /// Wraps a query failure.
    pub fn query(details: impl fmt::Display) -> Self {
        Self::Query {
            details: details.to_string(),
        }
    }

    /// Wraps a decode failure.
    pub fn decode(details: impl fmt::Display) -> Self {
        Self::Decode {
            details: details.to_string(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { details } => write!(f, "store unavailable: {details}"),
            Self::Query { details } => write!(f, "store query failed: {details}"),
            Self::Decode { details } => write!(f, "stored value could not be decoded: {details}"),
        }
    }
}

impl std::error::Error for StoreError {}
