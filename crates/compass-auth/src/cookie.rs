//! Role-scoped session cookies
//!
//! The cookie-name-to-role mapping is an explicit table here rather than
//! string literals scattered across the guards. The bare `jwt` name is kept
//! for clients of the legacy shared login and has the highest precedence in
//! the generic guard.

use axum_extra::extract::cookie::{Cookie, SameSite};
use compass_db::Role;
use time::Duration;

use crate::jwt::TOKEN_TTL_DAYS;

/// Legacy shared session cookie
pub const GENERIC_COOKIE: &str = "jwt";
/// Admin session cookie
pub const ADMIN_COOKIE: &str = "jwt_admin";
/// Worker session cookie
pub const WORKER_COOKIE: &str = "jwt_worker";
/// Customer session cookie
pub const CUSTOMER_COOKIE: &str = "jwt_customer";
/// Sales session cookie
pub const SALES_COOKIE: &str = "jwt_sales";

/// Cookie precedence for the generic guard; the first present cookie wins
/// and the rest are not consulted.
pub const GENERIC_PRECEDENCE: [&str; 5] = [
    GENERIC_COOKIE,
    ADMIN_COOKIE,
    WORKER_COOKIE,
    CUSTOMER_COOKIE,
    SALES_COOKIE,
];

/// Cookie name set by a login with the given declared role
pub fn role_cookie_name(role: Role) -> &'static str {
    match role {
        Role::Customer => CUSTOMER_COOKIE,
        Role::Worker => WORKER_COOKIE,
        Role::Admin => ADMIN_COOKIE,
        Role::Sales => SALES_COOKIE,
    }
}

/// Build a session cookie carrying a freshly issued token
///
/// HttpOnly, SameSite=Strict and the 15-day max-age are security-critical
/// and match the token TTL. `secure` is disabled only for local development
/// over plain HTTP.
pub fn session_cookie(name: &'static str, token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(Duration::days(TOKEN_TTL_DAYS))
        .build()
}

/// Build the cookie used to clear a session on logout
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, "")).path("/").build()
}
