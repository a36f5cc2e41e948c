/// User model and credential store operations
///
/// The credential store is deliberately narrow: users are inserted on
/// registration and read back by username on login. Nothing updates or
/// deletes a user.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(255) NOT NULL,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     CONSTRAINT users_username_key UNIQUE (username)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasklist_shared::models::user::{NewUser, User};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), tasklist_shared::error::StoreError> {
/// let user = User::create(&pool, NewUser {
///     username: "alice".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
///
/// let found = User::find_by_username(&pool, "alice").await?;
/// assert_eq!(found.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```

use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// A registered user
///
/// `password_hash` is always an Argon2id PHC string, never a plaintext password.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Storage-assigned ID
    pub id: i64,

    /// Unique, immutable login name
    pub username: String,

    /// Argon2id PHC hash of the password
    pub password_hash: String,

    /// When the user registered
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name (must be unique)
    pub username: String,

    /// Already-hashed password
    pub password_hash: String,
}

/// Persistence for user credentials
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user, failing with `StoreError::Duplicate` if the username is taken
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;

    /// Looks up a user by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Checks that the backing store is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}

impl User {
    /// Inserts a new user row
    ///
    /// # Errors
    ///
    /// - `StoreError::Duplicate` if the username already exists
    /// - `StoreError::Database` for any other database failure
    pub async fn create(pool: &PgPool, data: NewUser) -> Result<Self, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by username
    ///
    /// Returns `None` if no user has that username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Self>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl UserStore for PgPool {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        User::create(self, user).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        User::find_by_username(self, username).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::db::pool::health_check(self).await?;
        Ok(())
    }
}
