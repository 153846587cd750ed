//! Session token codec
//!
//! Tokens are stateless signed JWTs carrying only the subject id and the
//! issue/expiry timestamps. There is no revocation list: logout is cookie
//! removal on the client, and a token stays valid until natural expiry.
//! Callers depend on the [`TokenCodec`] trait so a revocation-aware codec
//! can replace [`JwtCodec`] without touching the guards.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;

/// Session lifetime. Cookie max-age uses the same value.
pub const TOKEN_TTL_DAYS: i64 = 15;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (credential record id, unique within its collection)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Token issuance and verification
pub trait TokenCodec: Send + Sync {
    /// Sign a token for the given subject id with the fixed session TTL
    fn issue(&self, subject_id: i64) -> Result<String, AuthError>;

    /// Verify a token and return its subject id
    ///
    /// Deterministic and side-effect-free; never touches the store.
    fn verify(&self, token: &str) -> Result<i64, AuthError>;
}

/// Stateless HS256 codec backed by the process-wide signing secret
#[derive(Clone)]
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtCodec {
    /// Create a codec from the configured signing secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl TokenCodec for JwtCodec {
    fn issue(&self, subject_id: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: subject_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        debug!("Issuing session token for subject {}", subject_id);

        encode(&Header::default(), &claims, &self.encoding_key).map_err(map_jwt_error)
    }

    fn verify(&self, token: &str) -> Result<i64, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(map_jwt_error)?;

        token_data
            .claims
            .sub
            .parse()
            .map_err(|_| AuthError::MalformedToken)
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature => AuthError::InvalidToken,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => AuthError::MalformedToken,
        _ => AuthError::InvalidToken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let codec = JwtCodec::new("test-secret-key");

        let token = codec.issue(42).unwrap();
        let subject = codec.verify(&token).unwrap();

        assert_eq!(subject, 42);
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let codec = JwtCodec::new("test-secret-key");

        let result = codec.verify("not-a-token");
        assert!(matches!(result, Err(AuthError::MalformedToken)));
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let codec = JwtCodec::new("test-secret-key");
        let other = JwtCodec::new("another-secret");

        let token = other.issue(7).unwrap();
        let result = codec.verify(&token);
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_tampered_signature_is_invalid() {
        let codec = JwtCodec::new("test-secret-key");

        let mut token = codec.issue(7).unwrap();
        // Flip the last signature character
        let last = token.pop().unwrap();
        token.push(if last == 'A' { 'B' } else { 'A' });

        let result = codec.verify(&token);
        assert!(matches!(
            result,
            Err(AuthError::InvalidToken) | Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn test_expired_token_with_valid_signature() {
        let codec = JwtCodec::new("test-secret-key");

        // Encode claims an hour past expiry with the same secret; past the
        // default validation leeway, so only the exp check can fail.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "42".to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret-key"),
        )
        .unwrap();

        let result = codec.verify(&token);
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }
}
