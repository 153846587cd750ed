//! Current-account routes

use axum::{Extension, Json, Router, middleware, routing::get};
use compass_auth::{AuthContext, Principal, require_authenticated};

use crate::state::AppState;

use super::types::PrincipalResponse;

/// GET /api/v1/me
///
/// Works with any role's session; the generic guard has already resolved
/// the caller to a principal.
async fn me(Extension(principal): Extension<Principal>) -> Json<PrincipalResponse> {
    Json(principal.into())
}

/// Create account routes
pub fn routes(auth: &AuthContext) -> Router<AppState> {
    Router::new()
        .route("/api/v1/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            auth.clone(),
            require_authenticated,
        ))
}
