//! Credential handling
//!
//! # Modules
//!
//! - [`password`]: Argon2id password hashing and verification
//! - [`service`]: register/login over a `UserStore`
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tasklist_shared::auth::password::HashParams;
//! use tasklist_shared::auth::service::{AuthService, Credentials};
//! use tasklist_shared::models::memory::MemoryUserStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = HashParams { memory_kib: 4096, iterations: 1, parallelism: 1 };
//! let auth = AuthService::with_params(Arc::new(MemoryUserStore::new()), params);
//!
//! auth.register(Credentials::new("alice", "s3cret")).await?;
//! let user = auth.login(Credentials::new("alice", "s3cret")).await?;
//! assert_eq!(user.username, "alice");
//! # Ok(())
//! # }
//! ```

pub mod password;
pub mod service;

pub use service::{AuthError, AuthService, AuthenticatedUser, Credentials};
