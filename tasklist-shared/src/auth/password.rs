/// Password hashing using Argon2id
///
/// Passwords are stored as PHC strings, which embed the algorithm, version,
/// cost parameters and salt alongside the hash:
///
/// ```text
/// $argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>
/// ```
///
/// Verification reads the parameters back out of the stored string, so hashes
/// produced with different [`HashParams`] all verify with [`verify_password`].
///
/// # Example
///
/// ```
/// use tasklist_shared::auth::password::{hash_password_with, verify_password, HashParams};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let params = HashParams { memory_kib: 4096, iterations: 1, parallelism: 1 };
/// let hash = hash_password_with("hunter2", &params)?;
///
/// assert!(verify_password("hunter2", &hash)?);
/// assert!(!verify_password("hunter3", &hash)?);
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Cost parameters were rejected by argon2
    #[error("Invalid hash parameters: {0}")]
    InvalidParams(String),

    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Stored hash is not a valid PHC string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes
    pub iterations: u32,

    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl HashParams {
    /// Fixed production work factor: 64 MiB, 3 passes, 4 lanes
    pub const PRODUCTION: HashParams = HashParams {
        memory_kib: 65536,
        iterations: 3,
        parallelism: 4,
    };

    fn argon2(&self) -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, Some(32))
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for HashParams {
    fn default() -> Self {
        Self::PRODUCTION
    }
}

/// Hashes a password with the production parameters
///
/// Each call draws a fresh 16-byte salt from the OS RNG, so hashing the same
/// password twice gives different strings.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    hash_password_with(password, &HashParams::PRODUCTION)
}

/// Hashes a password with explicit cost parameters
pub fn hash_password_with(password: &str, params: &HashParams) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = params
        .argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored PHC hash
///
/// # Returns
///
/// `Ok(true)` on match, `Ok(false)` on mismatch
///
/// # Errors
///
/// `PasswordError::InvalidHash` if `hash` can't be parsed or carries no hash
/// output, `VerifyError` for any other argon2 failure.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    // A PHC string may legally stop after the salt; argon2 would then report a
    // mismatch for every password
    if parsed_hash.hash.is_none() {
        return Err(PasswordError::InvalidHash("missing hash output".to_string()));
    }

    // Parameters come from the parsed hash, not from the default instance
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAST: HashParams = HashParams {
        memory_kib: 4096,
        iterations: 1,
        parallelism: 1,
    };

    #[test]
    fn test_hash_password_production_params() {
        let hash = hash_password("test_password_123").expect("Hash should succeed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
        assert!(hash.contains("m=65536"));
        assert!(hash.contains("t=3"));
        assert!(hash.contains("p=4"));
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hash = hash_password_with("plaintext-marker", &FAST).unwrap();
        assert!(!hash.contains("plaintext-marker"));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let hash1 = hash_password_with("same_password", &FAST).unwrap();
        let hash2 = hash_password_with("same_password", &FAST).unwrap();

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password_with("correct_password", &FAST).unwrap();
        assert!(verify_password("correct_password", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password_with("correct_password", &FAST).unwrap();

        assert!(!verify_password("wrong_password", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
        assert!(!verify_password("Correct_password", &hash).unwrap());
    }

    #[test]
    fn test_verify_reads_params_from_hash() {
        let hash = hash_password_with("pw", &FAST).unwrap();
        assert!(hash.contains("m=4096,t=1,p=1"));
        assert!(verify_password("pw", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(matches!(
            verify_password("password", "invalid_hash"),
            Err(PasswordError::InvalidHash(_))
        ));
        assert!(matches!(
            verify_password("password", "$argon2id$invalid"),
            Err(PasswordError::InvalidHash(_))
        ));
    }

    #[test]
    fn test_verify_password_hash_without_output() {
        let salt_only = "$argon2id$v=19$m=4096,t=1,p=1$c29tZXNhbHQ";

        assert!(matches!(
            verify_password("password", salt_only),
            Err(PasswordError::InvalidHash(_))
        ));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = HashParams {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        assert!(matches!(
            hash_password_with("pw", &params),
            Err(PasswordError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_unicode_password_roundtrip() {
        let hash = hash_password_with("unicode-密码-パスワード", &FAST).unwrap();
        assert!(verify_password("unicode-密码-パスワード", &hash).unwrap());
    }
}
