//! Core domain types and utilities for notekeep.
//!
//! This crate provides the identifier types and the storage error shared by
//! the access, notes, and server crates.

pub mod error;
pub mod id;

pub use error::{Result, StoreError};
pub use id::{NoteId, ParseIdError, UserId};
