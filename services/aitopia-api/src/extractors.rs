//! Axum extractors for authentication

use aitopia_auth_core::AuthError;
use aitopia_types::AccountId;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated account extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub account_id: AccountId,
    pub email: String,
    pub name: Option<String>,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = extract_bearer(parts).ok_or(AuthError::MissingCredentials)?;

        let claims = app_state.tokens.validate(token).inspect_err(|e| {
            tracing::debug!(error = ?e, "Token validation failed");
        })?;

        let account_id = claims.account_id()?;

        Ok(Self {
            account_id,
            email: claims.email,
            name: claims.name,
        })
    }
}

/// Bearer token from the Authorization header
fn extract_bearer(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(auth: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/subscription");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(&parts(Some("Bearer abc.def"))), Some("abc.def"));
        assert_eq!(extract_bearer(&parts(Some("Basic abc"))), None);
        assert_eq!(extract_bearer(&parts(Some("Bearer "))), None);
        assert_eq!(extract_bearer(&parts(None)), None);
    }
}
