//! Login, logout and signup routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use axum_extra::extract::CookieJar;
use compass_auth::{TOKEN_TTL_DAYS, cookie, hash_password};
use compass_db::{NewCustomer, Role};
use serde_json::{Value, json};
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

use super::types::{LoginRequest, LoginResponse, PrincipalResponse, SignupRequest};

// ==================== Input Validation ====================

/// Maximum allowed email length
const MAX_EMAIL_LENGTH: usize = 254;
/// Maximum allowed password length (prevent DoS with very large passwords)
const MAX_PASSWORD_LENGTH: usize = 256;
/// Minimum allowed password length for signup
const MIN_PASSWORD_LENGTH: usize = 8;
/// Maximum allowed name length
const MAX_NAME_LENGTH: usize = 128;

/// Validate email shape and length
fn validate_email(email: &str) -> Result<(), ApiError> {
    if email.is_empty() {
        return Err(ApiError::BadRequest("Email cannot be empty".to_string()));
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Email exceeds maximum length of {} characters",
            MAX_EMAIL_LENGTH
        )));
    }
    if !email.contains('@') {
        return Err(ApiError::BadRequest("Invalid email address".to_string()));
    }
    Ok(())
}

/// Cap password length before it reaches the hasher
fn validate_password_length(password: &str) -> Result<(), ApiError> {
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Password exceeds maximum length of {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

fn parse_role(role: &str) -> Result<Role, ApiError> {
    Role::from_str(role).map_err(|_| ApiError::BadRequest(format!("Unknown role: {}", role)))
}

// ==================== Auth Routes ====================

/// POST /api/v1/auth/{role}/login
async fn login(
    State(state): State<AppState>,
    Path(role): Path<String>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), ApiError> {
    let role = parse_role(&role)?;
    validate_email(&request.email)?;
    validate_password_length(&request.password)?;

    let (principal, token) = state
        .issuer
        .login(&request.email, &request.password, role)
        .await?;

    let cookie = cookie::session_cookie(
        cookie::role_cookie_name(role),
        token,
        state.auth.cookie_secure,
    );

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            user: principal.into(),
            expires_in: TOKEN_TTL_DAYS * 24 * 3600,
        }),
    ))
}

/// POST /api/v1/auth/{role}/logout
///
/// Clears the role-scoped cookie. Idempotent: succeeds whether or not a
/// cookie was present, and regardless of token validity. The token itself
/// stays valid until natural expiry (stateless codec, no revocation list).
async fn logout(
    State(state): State<AppState>,
    Path(role): Path<String>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let role = parse_role(&role)?;
    let name = cookie::role_cookie_name(role);

    debug!("Clearing {} session cookie", role);

    Ok((
        jar.remove(cookie::removal_cookie(name)),
        Json(json!({ "status": "logged out" })),
    ))
}

/// POST /api/v1/auth/customer/signup
async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<PrincipalResponse>), ApiError> {
    validate_email(&request.email)?;
    validate_password_length(&request.password)?;
    if request.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        )));
    }
    if request.full_name.is_empty() || request.full_name.len() > MAX_NAME_LENGTH {
        return Err(ApiError::BadRequest("Invalid name".to_string()));
    }

    debug!("Customer signup: {}", request.email);

    let password_hash = hash_password(&request.password)?;

    let customer = state
        .db
        .insert_customer(NewCustomer {
            full_name: request.full_name,
            email: request.email,
            password_hash,
            phone: request.phone,
            address: request.address,
        })
        .await?;

    info!("Customer {} registered", customer.email);

    let principal = compass_auth::Principal::from(customer);
    Ok((StatusCode::CREATED, Json(principal.into())))
}

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/customer/signup", post(signup))
        .route("/api/v1/auth/{role}/login", post(login))
        .route("/api/v1/auth/{role}/logout", post(logout))
}
