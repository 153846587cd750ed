//! Product catalog routes

use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::{self, Next},
    routing::get,
};
use compass_auth::{AuthContext, authorize_roles, require_authenticated};
use compass_db::Role;

use crate::error::ApiError;
use crate::state::AppState;

use super::types::ProductResponse;

/// Every role may browse the catalog
const CATALOG_ROLES: &[Role] = &[Role::Customer, Role::Worker, Role::Admin, Role::Sales];

/// GET /api/v1/products
async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.db.list_products().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// Create catalog routes
///
/// Layers apply outermost-last: the guard added second runs before the
/// allowlist added first.
pub fn routes(auth: &AuthContext) -> Router<AppState> {
    Router::new()
        .route("/api/v1/products", get(list_products))
        .route_layer(middleware::from_fn(|request: Request, next: Next| {
            authorize_roles(CATALOG_ROLES, request, next)
        }))
        .route_layer(middleware::from_fn_with_state(
            auth.clone(),
            require_authenticated,
        ))
}
