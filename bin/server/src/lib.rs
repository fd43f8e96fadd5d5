//! notekeep HTTP server.
//!
//! This crate wires the notekeep libraries to axum: Google sign-in, signed
//! session cookies, the owner-scoped notes API, and the Postgres repositories
//! behind them.

pub mod app;
pub mod auth;
pub mod config;
pub mod cookies;
pub mod db;
pub mod error;
pub mod health;
pub mod notes;
pub mod types;
pub mod user;

pub use app::{AppState, router};
