//! Owner-scoped note storage for notekeep.
//!
//! Notes are short text memos owned by exactly one user. They can be listed,
//! added, and removed, always on behalf of an authenticated owner; they are
//! never edited in place.
//!
//! - `Note`, `NoteText`: the domain record and its validated text
//! - `NoteRepository`: storage contract implemented by Postgres and memory
//! - `NoteBook`: the owner-scoped operations handlers call
//! - `NoteError`: expected failures (empty text, not found) plus storage

pub mod book;
pub mod error;
pub mod memory;
pub mod note;
pub mod repository;

pub use book::NoteBook;
pub use error::NoteError;
pub use note::{Note, NoteText};
pub use repository::NoteRepository;
