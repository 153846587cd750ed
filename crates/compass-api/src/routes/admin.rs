//! Admin-only routes

use axum::{Json, Router, extract::State, middleware, routing::get};
use compass_auth::{AuthContext, require_admin};

use crate::error::ApiError;
use crate::state::AppState;

use super::types::WorkerResponse;

/// GET /api/v1/admin/workers
///
/// Behind the admin guard: only the jwt_admin cookie is consulted, and the
/// subject id is looked up in the admins collection alone.
async fn list_workers(State(state): State<AppState>) -> Result<Json<Vec<WorkerResponse>>, ApiError> {
    let workers = state.db.list_workers().await?;
    Ok(Json(workers.into_iter().map(Into::into).collect()))
}

/// Create admin routes
pub fn routes(auth: &AuthContext) -> Router<AppState> {
    Router::new()
        .route("/api/v1/admin/workers", get(list_workers))
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_admin))
}
