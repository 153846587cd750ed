//! Task operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{NewTask, Task, TaskStatus};
use crate::repository::Database;

impl Database {
    /// Insert a new task assigned to a worker
    pub async fn insert_task(&self, task: NewTask) -> Result<Task, DbError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO tasks (worker_id, title, status, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(task.worker_id)
        .bind(&task.title)
        .bind(TaskStatus::Open.as_str())
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Task {
            id,
            worker_id: task.worker_id,
            title: task.title,
            status: TaskStatus::Open,
            created_at: now,
        })
    }

    /// List tasks assigned to a worker
    pub async fn list_tasks_for_worker(&self, worker_id: i64) -> Result<Vec<Task>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, worker_id, title, status, created_at
            FROM tasks
            WHERE worker_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(worker_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Task::try_from(row).map_err(DbError::from))
            .collect()
    }

    /// Mark a task completed; returns false if the task does not exist or
    /// belongs to a different worker
    pub async fn complete_task(&self, id: i64, worker_id: i64) -> Result<bool, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET status = ?
            WHERE id = ? AND worker_id = ?
            "#,
        )
        .bind(TaskStatus::Completed.as_str())
        .bind(id)
        .bind(worker_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
