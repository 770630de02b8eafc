//! Auth errors

use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// No bearer credentials were supplied
    #[error("missing credentials")]
    MissingCredentials,

    /// Invalid token (malformed, bad signature, etc.)
    #[error("invalid token")]
    InvalidToken,

    /// Token has expired
    #[error("token expired")]
    TokenExpired,

    /// Token could not be signed
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingCredentials | Self::InvalidToken | Self::TokenExpired => 401,
            Self::Encoding(_) => 500,
        }
    }
}
