//! # Tasklist API Library
//!
//! HTTP boundary for the two Tasklist servers: the auth server
//! (`tasklist-auth`) and the task server (`tasklist-tasks`).
//!
//! ## Modules
//!
//! - `app`: application state and router builders
//! - `config`: configuration management
//! - `error`: error handling and HTTP response mapping
//! - `extract`: JSON/path extractors with JSON rejections
//! - `middleware`: response security headers
//! - `routes`: route handlers
//! - `server`: tracing, database bootstrap and serving

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod server;
