//! Authentication error types
//!
//! Every auth failure is terminal for the request. The response body is a
//! minimal JSON object; login failures never distinguish an unknown email
//! from a wrong password, to avoid account enumeration.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing session cookie")]
    NoToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Principal not found")]
    PrincipalNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Store error: {0}")]
    Store(#[from] compass_db::DbError),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            AuthError::NoToken => (StatusCode::UNAUTHORIZED, "Missing session cookie"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
            AuthError::MalformedToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            // A valid token whose subject no longer exists is still a 401,
            // not a 404: the route itself was found.
            AuthError::PrincipalNotFound => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AuthError::InsufficientPermissions => {
                (StatusCode::FORBIDDEN, "Insufficient permissions")
            }
            AuthError::PasswordHash(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
            AuthError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
        };

        let body = axum::Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
