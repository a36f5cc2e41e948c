//! # Tasklist Shared Library
//!
//! Domain types, stores and services used by both Tasklist servers.
//!
//! ## Module Organization
//!
//! - `models`: users and tasks, their store traits, Postgres and in-memory stores
//! - `auth`: password hashing and the register/login service
//! - `tasks`: the task CRUD service
//! - `db`: connection pool and migrations
//! - `error`: storage error type

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod tasks;

/// Current version of the shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
