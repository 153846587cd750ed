//! Admin collection operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{Admin, NewAdmin};
use crate::repository::Database;

impl Database {
    /// Insert a new admin
    pub async fn insert_admin(&self, admin: NewAdmin) -> Result<Admin, DbError> {
        let now = Utc::now();

        let existing = self.get_admin_by_email(&admin.email).await?;
        if existing.is_some() {
            return Err(DbError::Duplicate(format!(
                "Admin '{}' already exists",
                admin.email
            )));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO admins (full_name, email, password_hash, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&admin.full_name)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Admin {
            id,
            full_name: admin.full_name,
            email: admin.email,
            password_hash: admin.password_hash,
            created_at: now,
        })
    }

    /// Get an admin by email
    pub async fn get_admin_by_email(&self, email: &str) -> Result<Option<Admin>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, full_name, email, password_hash, created_at
            FROM admins
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Admin::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Get an admin by ID
    pub async fn get_admin_by_id(&self, id: i64) -> Result<Option<Admin>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, full_name, email, password_hash, created_at
            FROM admins
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Admin::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Check if any admins exist
    pub async fn has_admins(&self) -> Result<bool, DbError> {
        let result = sqlx::query("SELECT COUNT(*) as count FROM admins")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = result.get("count");
        Ok(count > 0)
    }
}
