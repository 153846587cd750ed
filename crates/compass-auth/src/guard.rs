//! Access guards for Axum
//!
//! Two guard flavors run as request-pipeline middleware before a handler:
//! single-role guards read only their own role's cookie and query that one
//! collection directly, while the generic guard takes the first cookie
//! present in the precedence table and hands the subject id to the
//! cascading resolver. Either flavor attaches a [`Principal`] to request
//! extensions; [`authorize_roles`] composes after a guard and checks the
//! attached role against a route's allowlist.
//!
//! Per request the transitions are Unauthenticated -> TokenVerified ->
//! Identified -> Authorized; any failed transition short-circuits into an
//! HTTP error response. Guards never write, so a client disconnect
//! mid-lookup leaves no partial state.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use compass_db::{Database, Role};
use std::sync::Arc;
use tracing::debug;

use crate::cookie;
use crate::error::AuthError;
use crate::jwt::TokenCodec;
use crate::principal::{Principal, find_principal};
use crate::resolver::RoleResolver;

/// Everything the guards need, shared across requests
#[derive(Clone)]
pub struct AuthContext {
    pub codec: Arc<dyn TokenCodec>,
    pub db: Database,
    pub resolver: Arc<RoleResolver>,
    /// Whether session cookies carry the Secure attribute; off only for
    /// local development over plain HTTP
    pub cookie_secure: bool,
}

impl AuthContext {
    pub fn new(db: Database, codec: Arc<dyn TokenCodec>, cookie_secure: bool) -> Self {
        let resolver = Arc::new(RoleResolver::standard(db.clone()));
        Self {
            codec,
            db,
            resolver,
            cookie_secure,
        }
    }
}

/// Middleware requiring an admin session cookie
pub async fn require_admin(
    State(ctx): State<AuthContext>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    guard_single_role(ctx, Role::Admin, request, next).await
}

/// Middleware requiring a worker session cookie
pub async fn require_worker(
    State(ctx): State<AuthContext>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    guard_single_role(ctx, Role::Worker, request, next).await
}

/// Middleware requiring a customer session cookie
pub async fn require_customer(
    State(ctx): State<AuthContext>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    guard_single_role(ctx, Role::Customer, request, next).await
}

// There is deliberately no require_sales: sales sessions only enter through
// the generic guard.

async fn guard_single_role(
    ctx: AuthContext,
    role: Role,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let jar = CookieJar::from_headers(request.headers());
    let token = jar
        .get(cookie::role_cookie_name(role))
        .map(|c| c.value().to_string())
        .ok_or(AuthError::NoToken)?;

    let subject_id = ctx.codec.verify(&token)?;

    // Single collection lookup; the resolver is bypassed so a colliding id
    // in another collection cannot satisfy this guard.
    let principal = find_principal(&ctx.db, role, subject_id)
        .await?
        .ok_or(AuthError::PrincipalNotFound)?;

    debug!("Authenticated {} {} ({})", role, principal.email, principal.id);

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Middleware accepting any resolvable session
///
/// Reads whichever role-scoped cookie is present in the fixed precedence
/// `jwt > jwt_admin > jwt_worker > jwt_customer > jwt_sales`; when several
/// are set only the highest-precedence one is checked.
pub async fn require_authenticated(
    State(ctx): State<AuthContext>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let jar = CookieJar::from_headers(request.headers());
    let token = cookie::GENERIC_PRECEDENCE
        .iter()
        .find_map(|name| jar.get(name))
        .map(|c| c.value().to_string())
        .ok_or(AuthError::NoToken)?;

    let subject_id = ctx.codec.verify(&token)?;
    let principal = ctx.resolver.resolve(subject_id).await?;

    debug!(
        "Authenticated {} {} ({})",
        principal.role, principal.email, principal.id
    );

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

/// Allowlist check composed after a guard
///
/// Rejects with 403 when the attached principal's role is not allowed, and
/// with 401 when no guard ran at all (no principal attached).
pub async fn authorize_roles(
    allowed: &'static [Role],
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let principal = request
        .extensions()
        .get::<Principal>()
        .ok_or(AuthError::NoToken)?;

    if !allowed.contains(&principal.role) {
        debug!(
            "Role {} not in allowlist {:?} for {}",
            principal.role,
            allowed,
            request.uri().path()
        );
        return Err(AuthError::InsufficientPermissions);
    }

    Ok(next.run(request).await)
}
