/// Storage error type shared by every store implementation
///
/// Stores collapse backend failures into two cases the services care about:
/// a uniqueness violation (surfaced to users) and everything else (opaque).

/// Error returned by `UserStore` and `TaskStore` implementations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write
    #[error("Unique constraint violated: {constraint}")]
    Duplicate {
        /// Name of the violated constraint (empty if the backend did not report one)
        constraint: String,
    },

    /// The SQL backend failed
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// A non-SQL backend could not serve the request
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Returns true if the error is a uniqueness violation
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::Duplicate {
                    constraint: db_err.constraint().unwrap_or_default().to_string(),
                };
            }
        }

        StoreError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_not_duplicate() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_duplicate());
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_duplicate_display() {
        let err = StoreError::Duplicate {
            constraint: "users_username_key".to_string(),
        };
        assert!(err.is_duplicate());
        assert_eq!(
            err.to_string(),
            "Unique constraint violated: users_username_key"
        );
    }
}
