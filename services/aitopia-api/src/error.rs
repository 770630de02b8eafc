//! Error types for the AItopia API service.

use aitopia_auth_core::AuthError;
use aitopia_billing_core::BillingError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bearer credentials missing or rejected; details stay in the logs
    #[error("Unauthorized")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Billing(#[from] BillingError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Auth(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Billing(err) => match err {
                BillingError::Unauthorized => StatusCode::UNAUTHORIZED,
                BillingError::NotFound => StatusCode::NOT_FOUND,
                BillingError::InvalidInput(_)
                | BillingError::InvalidPlan
                | BillingError::InvalidTools(_)
                | BillingError::TooManyTools { .. } => StatusCode::BAD_REQUEST,
                BillingError::Conflict(_) => StatusCode::CONFLICT,
                BillingError::Database(_) | BillingError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Auth(AuthError::Encoding(_)) => "INTERNAL_ERROR",
            Self::Auth(_) => "UNAUTHORIZED",
            Self::BadRequest(_) => "INVALID_INPUT",
            Self::Billing(err) => match err {
                BillingError::Unauthorized => "UNAUTHORIZED",
                BillingError::NotFound => "USER_NOT_FOUND",
                BillingError::InvalidInput(_) => "INVALID_INPUT",
                BillingError::InvalidPlan => "INVALID_PLAN",
                BillingError::InvalidTools(_) => "INVALID_TOOLS",
                BillingError::TooManyTools { .. } => "TOO_MANY_TOOLS",
                BillingError::Conflict(_) => "CONFLICT",
                BillingError::Database(_) | BillingError::Internal(_) => "INTERNAL_ERROR",
            },
        }
    }

    fn is_internal(&self) -> bool {
        match self {
            Self::Auth(err) => err.status_code() >= 500,
            Self::Billing(err) => err.is_internal(),
            Self::BadRequest(_) => false,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        Self::Billing(BillingError::missing_fields())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // Internal details are logged, never returned
        let message = if self.is_internal() {
            tracing::error!(error = ?self, "Internal API error");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use aitopia_types::Plan;

    #[test]
    fn test_status_codes() {
        let cases: [(ApiError, StatusCode); 7] = [
            (AuthError::MissingCredentials.into(), StatusCode::UNAUTHORIZED),
            (AuthError::TokenExpired.into(), StatusCode::UNAUTHORIZED),
            (BillingError::NotFound.into(), StatusCode::NOT_FOUND),
            (BillingError::InvalidPlan.into(), StatusCode::BAD_REQUEST),
            (
                BillingError::TooManyTools {
                    limit: 3,
                    plan: Plan::Starter,
                }
                .into(),
                StatusCode::BAD_REQUEST,
            ),
            (BillingError::Conflict("taken".into()).into(), StatusCode::CONFLICT),
            (
                BillingError::Internal("boom".into()).into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err:?}");
        }
    }

    #[test]
    fn test_auth_errors_share_one_message() {
        for err in [AuthError::MissingCredentials, AuthError::InvalidToken, AuthError::TokenExpired] {
            let err = ApiError::from(err);
            assert_eq!(err.to_string(), "Unauthorized");
            assert_eq!(err.error_code(), "UNAUTHORIZED");
            assert!(!err.is_internal());
        }

        let err = ApiError::from(AuthError::Encoding("bad key".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_internal());
    }

    #[test]
    fn test_internal_message_is_generic() {
        let err: ApiError = BillingError::Internal("connection reset".into()).into();
        assert!(err.is_internal());
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
