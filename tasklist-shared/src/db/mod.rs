//! Database layer
//!
//! - `pool`: PostgreSQL connection pool and health check
//! - `migrations`: database creation and schema migrations
//!
//! Models and their queries are in the `models` module.

pub mod migrations;
pub mod pool;
