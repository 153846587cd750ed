//! Compass CRM REST API
//!
//! This crate provides the Axum-based HTTP API for Compass CRM: role-scoped
//! login/logout, customer signup, and the role-gated resource routes.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
