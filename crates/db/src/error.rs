//! Persistence-layer errors.
//!
//! Constraint violations reported by PostgreSQL are lifted out of
//! `sqlx::Error` into [`DbError::Integrity`] so callers can tell a duplicate
//! attempt or a dangling reference apart from a connection failure.

use elearn_core::error::CoreError;

const PG_UNIQUE_VIOLATION: &str = "23505";
const PG_FOREIGN_KEY_VIOLATION: &str = "23503";
const PG_CHECK_VIOLATION: &str = "23514";
const PG_NOT_NULL_VIOLATION: &str = "23502";

/// Which storage-level constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityKind {
    Unique,
    ForeignKey,
    Check,
    NotNull,
}

impl IntegrityKind {
    fn from_sqlstate(code: &str) -> Option<Self> {
        match code {
            PG_UNIQUE_VIOLATION => Some(Self::Unique),
            PG_FOREIGN_KEY_VIOLATION => Some(Self::ForeignKey),
            PG_CHECK_VIOLATION => Some(Self::Check),
            PG_NOT_NULL_VIOLATION => Some(Self::NotNull),
            _ => None,
        }
    }
}

impl std::fmt::Display for IntegrityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Unique => "unique",
            Self::ForeignKey => "foreign key",
            Self::Check => "check",
            Self::NotNull => "not null",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A domain-level error (validation, missing row, blob storage).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage constraint rejected the write.
    #[error("Integrity error ({kind}): {constraint}")]
    Integrity {
        kind: IntegrityKind,
        constraint: String,
    },

    /// Any other database failure.
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl DbError {
    /// The violated constraint kind, if this is an integrity error.
    pub fn integrity_kind(&self) -> Option<IntegrityKind> {
        match self {
            Self::Integrity { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(kind) = db_err.code().as_deref().and_then(IntegrityKind::from_sqlstate) {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return DbError::Integrity { kind, constraint };
            }
        }
        DbError::Database(err)
    }
}

impl From<validator::ValidationErrors> for DbError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DbError::Core(errors.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlstate_mapping() {
        assert_eq!(IntegrityKind::from_sqlstate("23505"), Some(IntegrityKind::Unique));
        assert_eq!(IntegrityKind::from_sqlstate("23503"), Some(IntegrityKind::ForeignKey));
        assert_eq!(IntegrityKind::from_sqlstate("23514"), Some(IntegrityKind::Check));
        assert_eq!(IntegrityKind::from_sqlstate("23502"), Some(IntegrityKind::NotNull));
        assert_eq!(IntegrityKind::from_sqlstate("42P01"), None);
    }

    #[test]
    fn non_database_errors_stay_database() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DbError::Database(sqlx::Error::RowNotFound)));
        assert_eq!(err.integrity_kind(), None);
    }

    #[test]
    fn integrity_message() {
        let err = DbError::Integrity {
            kind: IntegrityKind::Unique,
            constraint: "uq_taken_quizzes_attempt".into(),
        };
        assert_eq!(
            err.to_string(),
            "Integrity error (unique): uq_taken_quizzes_attempt"
        );
    }
}
