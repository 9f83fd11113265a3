use thiserror::Error;

/// Errors from repository operations (used by trait definitions in popple-core).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// True for the "no such row" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound)
    }
}

/// Errors delivered by karma service operations.
#[derive(Debug, Error)]
pub enum KarmaError {
    /// The persistence layer failed; carried verbatim.
    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),

    /// The operation's task ended without delivering a result.
    #[error("karma operation ended without a result")]
    Interrupted,
}

impl KarmaError {
    /// True when the underlying storage reported a missing row.
    ///
    /// Callers use this to fall back to a default server config.
    pub fn is_not_found(&self) -> bool {
        matches!(self, KarmaError::Storage(e) if e.is_not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_karma_error_wraps_storage_verbatim() {
        let err: KarmaError = RepositoryError::Conflict("duplicate".to_string()).into();
        assert_eq!(err.to_string(), "storage error: conflict: duplicate");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_is_detected_through_wrapper() {
        let err = KarmaError::from(RepositoryError::NotFound);
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "storage error: not found");
        assert!(!KarmaError::Interrupted.is_not_found());
    }
}
