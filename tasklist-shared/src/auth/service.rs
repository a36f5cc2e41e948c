/// Registration and login over a [`UserStore`]
///
/// The service owns the credential rules:
///
/// - usernames and passwords must be non-empty to register
/// - passwords are hashed with Argon2id before they reach the store
/// - a login for an unknown user and a login with the wrong password both
///   fail with [`AuthError::InvalidCredentials`], after the same argon2 work
///
/// Session handling (if any) belongs to the HTTP layer.

use super::password::{hash_password_with, verify_password, HashParams, PasswordError};
use crate::error::StoreError;
use crate::models::user::{NewUser, UserStore};
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, instrument, warn};

/// Errors returned by [`AuthService`]
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A required field was missing or empty
    #[error("{0}")]
    Validation(String),

    /// The username is already registered
    #[error("Username already exists")]
    DuplicateUsername,

    /// Unknown user or wrong password (deliberately not distinguished)
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The credential store failed
    #[error("Credential store failed: {0}")]
    StoreUnavailable(#[source] StoreError),

    /// Hashing or verification failed
    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Username/password pair as submitted by a client
///
/// `Debug` never prints the password.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
}

/// Password behind the stand-in hash checked for unknown usernames
const DUMMY_PASSWORD: &str = "tasklist-unknown-user";

/// Auth business logic, independent of the web framework
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    params: HashParams,

    /// Hash verified when the username is unknown, built lazily with `params`
    dummy_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    /// Creates a service hashing with the production work factor
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self::with_params(users, HashParams::PRODUCTION)
    }

    /// Creates a service with explicit hash parameters
    pub fn with_params(users: Arc<dyn UserStore>, params: HashParams) -> Self {
        Self {
            users,
            params,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Access to the underlying store (used by health checks)
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.users
    }

    /// Registers a new user
    ///
    /// # Errors
    ///
    /// - `Validation` if the username (trimmed) or password is empty, or
    ///   either contains a NUL character
    /// - `DuplicateUsername` if the username is taken
    /// - `StoreUnavailable` for any other storage fault
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn register(&self, credentials: Credentials) -> Result<(), AuthError> {
        let Credentials { username, password } = credentials;

        if username.trim().is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }
        if password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }
        if username.contains('\0') || password.contains('\0') {
            return Err(AuthError::Validation(
                "Username and password must not contain NUL characters".to_string(),
            ));
        }

        let params = self.params;
        let password_hash =
            run_blocking(move || hash_password_with(&password, &params)).await?;

        match self
            .users
            .insert(NewUser {
                username,
                password_hash,
            })
            .await
        {
            Ok(user) => {
                info!(user_id = user.id, "User registered");
                Ok(())
            }
            Err(StoreError::Duplicate { .. }) => Err(AuthError::DuplicateUsername),
            Err(e) => Err(AuthError::StoreUnavailable(e)),
        }
    }

    /// Checks a username/password pair
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` if the user doesn't exist or the password is wrong
    /// - `StoreUnavailable` if the lookup fails
    /// - `Password` if the stored hash is corrupt
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: Credentials) -> Result<AuthenticatedUser, AuthError> {
        let Credentials { username, password } = credentials;

        // No stored username can be empty or contain NUL
        if username.is_empty() || password.is_empty() || username.contains('\0') {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .users
            .find_by_username(&username)
            .await
            .map_err(AuthError::StoreUnavailable)?;

        // Unknown users are checked against the stand-in hash so both failure
        // paths cost one verification
        let stored_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash().await?,
        };
        let valid = run_blocking(move || verify_password(&password, &stored_hash)).await?;

        match user {
            Some(user) if valid => {
                info!(user_id = user.id, "User logged in");
                Ok(AuthenticatedUser {
                    id: user.id,
                    username: user.username,
                })
            }
            _ => {
                warn!("Login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    async fn dummy_hash(&self) -> Result<String, AuthError> {
        let params = self.params;
        self.dummy_hash
            .get_or_try_init(|| run_blocking(move || hash_password_with(DUMMY_PASSWORD, &params)))
            .await
            .cloned()
    }
}

/// Runs CPU-heavy argon2 work on the blocking pool
async fn run_blocking<T, F>(f: F) -> Result<T, AuthError>
where
    F: FnOnce() -> Result<T, PasswordError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AuthError::Password(PasswordError::HashError(e.to_string())))?
        .map_err(AuthError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::memory::MemoryUserStore;

    const FAST: HashParams = HashParams {
        memory_kib: 4096,
        iterations: 1,
        parallelism: 1,
    };

    fn service() -> (AuthService, Arc<MemoryUserStore>) {
        let store = Arc::new(MemoryUserStore::new());
        (AuthService::with_params(store.clone(), FAST), store)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let (svc, _) = service();
        svc.register(Credentials::new("alice", "s3cret")).await.unwrap();

        let user = svc.login(Credentials::new("alice", "s3cret")).await.unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let (svc, store) = service();
        svc.register(Credentials::new("alice", "s3cret")).await.unwrap();

        let stored = store.find_by_username("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "s3cret");
        assert!(stored.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let (svc, store) = service();
        svc.register(Credentials::new("alice", "first")).await.unwrap();

        let err = svc
            .register(Credentials::new("alice", "second"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername));
        assert_eq!(store.len().await, 1);

        // The original password still works
        assert!(svc.login(Credentials::new("alice", "first")).await.is_ok());
    }

    #[tokio::test]
    async fn test_register_requires_fields() {
        let (svc, store) = service();

        let err = svc.register(Credentials::new("", "pw")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let err = svc.register(Credentials::new("   ", "pw")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let err = svc.register(Credentials::new("alice", "")).await.unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (svc, _) = service();
        svc.register(Credentials::new("alice", "s3cret")).await.unwrap();

        for attempt in ["S3cret", "s3cret ", "", "other"] {
            let err = svc
                .login(Credentials::new("alice", attempt))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::InvalidCredentials), "{attempt:?}");
        }
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_look_the_same() {
        let (svc, _) = service();
        svc.register(Credentials::new("alice", "s3cret")).await.unwrap();

        let unknown = svc
            .login(Credentials::new("mallory", "s3cret"))
            .await
            .unwrap_err();
        let wrong = svc
            .login(Credentials::new("alice", "nope"))
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_unknown_user_still_verifies_a_hash() {
        let (svc, _) = service();
        assert!(svc.dummy_hash.get().is_none());

        let err = svc
            .login(Credentials::new("mallory", "s3cret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));

        // The stand-in hash uses the service's own cost parameters
        let dummy = svc.dummy_hash.get().expect("unknown-user login should hash");
        assert!(dummy.contains("m=4096,t=1,p=1"));

        // Even its source password is rejected for an unknown user
        let err = svc
            .login(Credentials::new("mallory", DUMMY_PASSWORD))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_register_rejects_nul() {
        let (svc, store) = service();

        let err = svc
            .register(Credentials::new("ali\0ce", "s3cret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        let err = svc
            .register(Credentials::new("alice", "s3\0cret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_login_with_nul_username_is_invalid_credentials() {
        let (svc, store) = service();
        store.set_offline(true);

        // Rejected before the store is consulted
        let err = svc
            .login(Credentials::new("ali\0ce", "s3cret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_store_failure_is_store_unavailable() {
        let (svc, store) = service();
        store.set_offline(true);

        let err = svc
            .register(Credentials::new("alice", "s3cret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));

        let err = svc
            .login(Credentials::new("alice", "s3cret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
        assert_eq!(
            err.to_string(),
            "Credential store failed: Store unavailable: in-memory store is offline"
        );
    }

    #[tokio::test]
    async fn test_corrupt_stored_hash_is_an_error() {
        let store = Arc::new(MemoryUserStore::new());
        store
            .insert(NewUser {
                username: "alice".to_string(),
                password_hash: "not-a-phc-string".to_string(),
            })
            .await
            .unwrap();
        let svc = AuthService::with_params(store, FAST);

        let err = svc
            .login(Credentials::new("alice", "anything"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Password(PasswordError::InvalidHash(_))));
    }

    #[tokio::test]
    async fn test_salt_only_stored_hash_is_an_error() {
        let store = Arc::new(MemoryUserStore::new());
        store
            .insert(NewUser {
                username: "alice".to_string(),
                password_hash: "$argon2id$v=19$m=4096,t=1,p=1$c29tZXNhbHQ".to_string(),
            })
            .await
            .unwrap();
        let svc = AuthService::with_params(store, FAST);

        let err = svc
            .login(Credentials::new("alice", "password"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Password(PasswordError::InvalidHash(_))));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("alice", "hunter2");
        let debug = format!("{creds:?}");

        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }
}
