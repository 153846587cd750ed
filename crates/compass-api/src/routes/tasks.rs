//! Task assignment and completion routes
//!
//! Assignment is open to admins and sales via the generic guard plus an
//! allowlist; the worker-facing routes sit behind the worker guard and only
//! ever touch the caller's own tasks.

use axum::{
    Extension, Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    routing::{get, post},
};
use compass_auth::{
    AuthContext, Principal, authorize_roles, require_authenticated, require_worker,
};
use compass_db::{NewTask, Role};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

use super::types::{AssignTaskRequest, TaskResponse};

/// Roles allowed to assign tasks
const ASSIGN_ROLES: &[Role] = &[Role::Admin, Role::Sales];

/// Maximum allowed task title length
const MAX_TITLE_LENGTH: usize = 256;

/// POST /api/v1/tasks (admin or sales)
async fn assign_task(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<AssignTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    if request.title.is_empty() || request.title.len() > MAX_TITLE_LENGTH {
        return Err(ApiError::BadRequest("Invalid task title".to_string()));
    }

    // The assignee must exist in the workers collection
    if state.db.get_worker_by_id(request.worker_id).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "Worker {} not found",
            request.worker_id
        )));
    }

    let task = state
        .db
        .insert_task(NewTask {
            worker_id: request.worker_id,
            title: request.title,
        })
        .await?;

    info!(
        "{} {} assigned task {} to worker {}",
        principal.role, principal.email, task.id, task.worker_id
    );

    Ok((StatusCode::CREATED, Json(task.into())))
}

/// GET /api/v1/worker/tasks
async fn my_tasks(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state.db.list_tasks_for_worker(principal.id).await?;
    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/worker/tasks/{id}/complete
async fn complete_task(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let updated = state.db.complete_task(id, principal.id).await?;
    if !updated {
        return Err(ApiError::NotFound(format!("Task {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Create task routes
pub fn routes(auth: &AuthContext) -> Router<AppState> {
    let worker_routes = Router::new()
        .route("/api/v1/worker/tasks", get(my_tasks))
        .route("/api/v1/worker/tasks/{id}/complete", post(complete_task))
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_worker));

    let assign_routes = Router::new()
        .route("/api/v1/tasks", post(assign_task))
        .route_layer(middleware::from_fn(|request: Request, next: Next| {
            authorize_roles(ASSIGN_ROLES, request, next)
        }))
        .route_layer(middleware::from_fn_with_state(
            auth.clone(),
            require_authenticated,
        ));

    worker_routes.merge(assign_routes)
}
