//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration failure
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// Unique constraint violated
    #[error("conflict: {0}")]
    Conflict(String),

    /// Stored value could not be mapped to a domain type
    #[error("invalid stored data: {0}")]
    InvalidData(String),
}

impl DbError {
    /// Map a sqlx error, turning unique violations into `Conflict`
    pub fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Conflict(db.constraint().unwrap_or("unique").to_string())
            }
            _ => Self::Sqlx(err),
        }
    }
}

/// Database result type
pub type DbResult<T> = Result<T, DbError>;
