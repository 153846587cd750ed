//! API routes

mod account;
mod admin;
mod auth;
mod catalog;
mod customer;
mod health;
mod tasks;
mod types;

use axum::Router;

use crate::state::AppState;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    let auth_ctx = state.auth.clone();

    Router::new()
        // Health check
        .merge(health::routes())
        // Login / logout / signup
        .merge(auth::routes())
        // Authenticated resources
        .merge(account::routes(&auth_ctx))
        .merge(catalog::routes(&auth_ctx))
        .merge(admin::routes(&auth_ctx))
        .merge(customer::routes(&auth_ctx))
        .merge(tasks::routes(&auth_ctx))
        .with_state(state)
}
