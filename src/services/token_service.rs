//! src/services/token_service.rs
//!
//! Issues and verifies the signed, one-hour identity tokens handed out by
//! `POST /login`. Tokens are stateless HS256 JWTs; there is no revocation.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime of every issued token.
pub const TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no bearer token supplied")]
    MissingToken,
    #[error("token rejected: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("access denied for role {role:?}")]
    Forbidden { role: Option<String> },
    #[error("failed to sign token: {0}")]
    Issue(#[source] jsonwebtoken::errors::Error),
}

/// Identity carried by a token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub username: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a token for `username` with `role`, expiring one hour from now.
    pub fn issue(&self, username: &str, role: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            username: username.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::default(), claims, &self.encoding_key).map_err(AuthError::Issue)
    }

    /// Verify a raw token and return its claims.
    ///
    /// `None` means the caller presented no token at all.
    pub fn verify(&self, token: Option<&str>) -> Result<Claims, AuthError> {
        let token = token.ok_or(AuthError::MissingToken)?;
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(AuthError::InvalidToken)
    }
}

/// Extract the credential from an `Authorization` header value: the second
/// whitespace-separated segment, as in `Bearer <token>`.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?.split_whitespace().nth(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret-key-for-testing")
    }

    #[test]
    fn issued_token_verifies_with_claims() {
        let service = service();
        let token = service.issue("ada", "admin").unwrap();

        let claims = service.verify(Some(token.as_str())).unwrap();
        assert_eq!(claims.username, "ada");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn missing_token_is_distinct_from_invalid() {
        let service = service();

        assert!(matches!(service.verify(None), Err(AuthError::MissingToken)));
        assert!(matches!(
            service.verify(Some("invalid.token.here")),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn token_from_other_secret_is_invalid() {
        let token = TokenService::new("other-secret").issue("ada", "admin").unwrap();

        assert!(matches!(
            service().verify(Some(token.as_str())),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn expired_token_is_invalid() {
        let service = service();
        let now = Utc::now().timestamp();
        let token = service
            .sign(&Claims {
                username: "ada".into(),
                role: "admin".into(),
                iat: now - 2 * TOKEN_TTL_SECS,
                exp: now - TOKEN_TTL_SECS,
            })
            .unwrap();

        assert!(matches!(
            service.verify(Some(token.as_str())),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn bearer_token_takes_second_segment() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(Some("Token   xyz")), Some("xyz"));
        assert_eq!(bearer_token(Some("Bearer")), None);
        assert_eq!(bearer_token(Some("")), None);
        assert_eq!(bearer_token(None), None);
    }
}
