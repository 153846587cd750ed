//! Sales representative collection operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{NewSalesRep, SalesRep};
use crate::repository::Database;

impl Database {
    /// Insert a new sales representative
    pub async fn insert_sales_rep(&self, rep: NewSalesRep) -> Result<SalesRep, DbError> {
        let now = Utc::now();

        let existing = self.get_sales_rep_by_email(&rep.email).await?;
        if existing.is_some() {
            return Err(DbError::Duplicate(format!(
                "Sales rep '{}' already exists",
                rep.email
            )));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO sales_reps (full_name, email, password_hash, region, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&rep.full_name)
        .bind(&rep.email)
        .bind(&rep.password_hash)
        .bind(&rep.region)
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(SalesRep {
            id,
            full_name: rep.full_name,
            email: rep.email,
            password_hash: rep.password_hash,
            region: rep.region,
            created_at: now,
        })
    }

    /// Get a sales representative by email
    pub async fn get_sales_rep_by_email(&self, email: &str) -> Result<Option<SalesRep>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, full_name, email, password_hash, region, created_at
            FROM sales_reps
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| SalesRep::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Get a sales representative by ID
    pub async fn get_sales_rep_by_id(&self, id: i64) -> Result<Option<SalesRep>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, full_name, email, password_hash, region, created_at
            FROM sales_reps
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| SalesRep::try_from(&row).map_err(DbError::from)).transpose()
    }
}
