//! logbook library entrypoint.
//!
//! Modules:
//! - `app`: startup, shared state, graceful shutdown
//! - `auth`: shared-secret header check
//! - `config`: environment-driven configuration
//! - `db`: schema setup and SQLite helpers
//! - `http`: Axum router and handlers
//! - `models`: typed records used across layers
//! - `store`: the log store trait and its SQLite and in-memory variants
//! - `util`: tracing setup

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod store;
pub mod util;
