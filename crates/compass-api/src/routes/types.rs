//! Request/Response DTOs

use compass_auth::Principal;
use compass_db::{Customer, Product, Task, Worker};
use serde::{Deserialize, Serialize};

// ==================== Auth Types ====================

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Serialize)]
pub struct LoginResponse {
    pub user: PrincipalResponse,
    pub expires_in: i64,
}

/// Customer signup request
#[derive(Deserialize)]
pub struct SignupRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Principal response (what downstream handlers see of the caller)
#[derive(Serialize)]
pub struct PrincipalResponse {
    pub id: i64,
    pub role: String,
    pub full_name: String,
    pub email: String,
}

impl From<Principal> for PrincipalResponse {
    fn from(p: Principal) -> Self {
        Self {
            id: p.id,
            role: p.role.as_str().to_string(),
            full_name: p.full_name,
            email: p.email,
        }
    }
}

/// Customer profile response (hash stripped)
#[derive(Serialize)]
pub struct CustomerProfileResponse {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<Customer> for CustomerProfileResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            full_name: c.full_name,
            email: c.email,
            phone: c.phone,
            address: c.address,
        }
    }
}

// ==================== Catalog Types ====================

/// Product response
#[derive(Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: compass_db::utils::format_price_cents(p.price_cents),
        }
    }
}

// ==================== Worker / Task Types ====================

/// Worker response (hash stripped)
#[derive(Serialize)]
pub struct WorkerResponse {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub specialization: String,
    pub status: String,
}

impl From<Worker> for WorkerResponse {
    fn from(w: Worker) -> Self {
        Self {
            id: w.id,
            full_name: w.full_name,
            email: w.email,
            specialization: w.specialization,
            status: w.status.as_str().to_string(),
        }
    }
}

/// Assign task request
#[derive(Deserialize)]
pub struct AssignTaskRequest {
    pub worker_id: i64,
    pub title: String,
}

/// Task response
#[derive(Serialize)]
pub struct TaskResponse {
    pub id: i64,
    pub worker_id: i64,
    pub title: String,
    pub status: String,
    pub created_at: String,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            worker_id: t.worker_id,
            title: t.title,
            status: t.status.as_str().to_string(),
            created_at: t.created_at.to_rfc3339(),
        }
    }
}
