//! Database models and store traits
//!
//! # Models
//!
//! - `user`: credential store (`users` table) and the `UserStore` trait
//! - `task`: to-do items (`tasks` table) and the `TaskStore` trait
//! - `memory`: in-memory implementations of both stores
//!
//! Both traits are implemented for `sqlx::PgPool`, so a pool can be handed
//! straight to the services.

pub mod memory;
pub mod task;
pub mod user;
