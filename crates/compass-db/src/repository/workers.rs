//! Worker collection operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{NewWorker, Worker};
use crate::repository::Database;

impl Database {
    /// Insert a new worker
    pub async fn insert_worker(&self, worker: NewWorker) -> Result<Worker, DbError> {
        let now = Utc::now();

        let existing = self.get_worker_by_email(&worker.email).await?;
        if existing.is_some() {
            return Err(DbError::Duplicate(format!(
                "Worker '{}' already exists",
                worker.email
            )));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO workers (full_name, email, password_hash, specialization, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&worker.full_name)
        .bind(&worker.email)
        .bind(&worker.password_hash)
        .bind(&worker.specialization)
        .bind(worker.status.as_str())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Worker {
            id,
            full_name: worker.full_name,
            email: worker.email,
            password_hash: worker.password_hash,
            specialization: worker.specialization,
            status: worker.status,
            created_at: now,
        })
    }

    /// Get a worker by email
    pub async fn get_worker_by_email(&self, email: &str) -> Result<Option<Worker>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, full_name, email, password_hash, specialization, status, created_at
            FROM workers
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Worker::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Get a worker by ID
    pub async fn get_worker_by_id(&self, id: i64) -> Result<Option<Worker>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, full_name, email, password_hash, specialization, status, created_at
            FROM workers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Worker::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// List all workers
    pub async fn list_workers(&self) -> Result<Vec<Worker>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, full_name, email, password_hash, specialization, status, created_at
            FROM workers
            ORDER BY full_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Worker::try_from(row).map_err(DbError::from))
            .collect()
    }
}
