//! Compass CRM Database Layer
//!
//! This crate provides the credential store and catalog persistence for
//! Compass CRM, using SQLite via sqlx. Each role (customer, worker, admin,
//! sales) has its own independent collection; email uniqueness is enforced
//! per collection, not globally.

pub mod error;
pub mod models;
pub mod repository;
pub mod utils;

pub use error::DbError;
pub use models::*;
pub use repository::Database;

/// Re-export sqlx types for convenience
pub use sqlx::SqlitePool;
