//! Health check route

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /api/v1/health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Create health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/health", get(health))
}
