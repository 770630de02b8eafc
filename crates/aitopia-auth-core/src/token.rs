//! HS256 JWT validation

use aitopia_types::AccountId;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{AuthConfig, AuthError};

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (account UUID)
    pub sub: String,
    /// Account email
    pub email: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl AccessClaims {
    /// Parse the subject as an account id
    pub fn account_id(&self) -> Result<AccountId, AuthError> {
        AccountId::parse(&self.sub).map_err(|_| {
            tracing::debug!(sub = %self.sub, "token subject is not a UUID");
            AuthError::InvalidToken
        })
    }
}

/// Verifies (and, for tooling and tests, issues) HS256 access tokens
#[derive(Clone)]
pub struct TokenValidator {
    config: AuthConfig,
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
}

impl TokenValidator {
    /// Create a validator from the shared secret in `config`
    pub fn new(config: AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            encoding_key: EncodingKey::from_secret(secret),
            config,
        }
    }

    /// Validate a JWT and return its claims
    pub fn validate(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.config.leeway.as_secs();
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            }
        })?;

        Ok(data.claims)
    }

    /// Validate a token and resolve the account it names
    pub fn authenticate(&self, token: &str) -> Result<AccountId, AuthError> {
        self.validate(token)?.account_id()
    }

    /// Sign a token for an account
    pub fn issue(
        &self,
        account_id: &AccountId,
        email: &str,
        name: Option<&str>,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.config.token_ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = AccessClaims {
            sub: account_id.to_string(),
            email: email.to_string(),
            name: name.map(str::to_string),
            iat: now,
            exp: now.saturating_add(ttl),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Encoding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

    fn validator() -> TokenValidator {
        TokenValidator::new(AuthConfig::new(SECRET))
    }

    #[test]
    fn test_issue_then_authenticate() {
        let v = validator();
        let id = AccountId::new();
        let token = v.issue(&id, "a@example.com", Some("Ada")).unwrap();

        let claims = v.validate(&token).unwrap();
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.name.as_deref(), Some("Ada"));
        assert_eq!(v.authenticate(&token).unwrap(), id);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = validator()
            .issue(&AccountId::new(), "a@example.com", None)
            .unwrap();
        let other = TokenValidator::new(AuthConfig::new("another-secret-also-32-bytes-long!!"));
        assert!(matches!(other.validate(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = AuthConfig::new(SECRET).with_leeway(Duration::ZERO);
        let v = TokenValidator::new(config);
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: AccountId::new().to_string(),
            email: "a@example.com".into(),
            name: None,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(v.validate(&token), Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            sub: "not-a-uuid".into(),
            email: "a@example.com".into(),
            name: None,
            iat: now,
            exp: now + 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            validator().authenticate(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert!(matches!(
            validator().validate("not.a.jwt"),
            Err(AuthError::InvalidToken)
        ));
    }
}
