//! Customer-facing routes

use axum::{Extension, Json, Router, extract::State, middleware, routing::get};
use compass_auth::{AuthContext, Principal, require_customer};

use crate::error::ApiError;
use crate::state::AppState;

use super::types::CustomerProfileResponse;

/// GET /api/v1/customer/profile
///
/// Behind the customer guard: only the jwt_customer cookie is consulted,
/// and the subject id is looked up in the customers collection alone.
async fn profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<CustomerProfileResponse>, ApiError> {
    let customer = state
        .db
        .get_customer_by_id(principal.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Customer {} not found", principal.id)))?;
    Ok(Json(customer.into()))
}

/// Create customer routes
pub fn routes(auth: &AuthContext) -> Router<AppState> {
    Router::new()
        .route("/api/v1/customer/profile", get(profile))
        .route_layer(middleware::from_fn_with_state(
            auth.clone(),
            require_customer,
        ))
}
