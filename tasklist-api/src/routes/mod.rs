//! API route handlers
//!
//! - `health`: health check, mounted on both servers
//! - `auth`: register and login (auth server)
//! - `tasks`: task CRUD (task server)

pub mod auth;
pub mod health;
pub mod tasks;
