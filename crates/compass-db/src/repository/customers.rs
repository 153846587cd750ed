//! Customer collection operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{Customer, NewCustomer};
use crate::repository::Database;

impl Database {
    /// Insert a new customer
    pub async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, DbError> {
        let now = Utc::now();

        let existing = self.get_customer_by_email(&customer.email).await?;
        if existing.is_some() {
            return Err(DbError::Duplicate(format!(
                "Customer '{}' already exists",
                customer.email
            )));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO customers (full_name, email, password_hash, phone, address, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&customer.full_name)
        .bind(&customer.email)
        .bind(&customer.password_hash)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Customer {
            id,
            full_name: customer.full_name,
            email: customer.email,
            password_hash: customer.password_hash,
            phone: customer.phone,
            address: customer.address,
            created_at: now,
        })
    }

    /// Get a customer by email
    pub async fn get_customer_by_email(&self, email: &str) -> Result<Option<Customer>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, full_name, email, password_hash, phone, address, created_at
            FROM customers
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Customer::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Get a customer by ID
    pub async fn get_customer_by_id(&self, id: i64) -> Result<Option<Customer>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT id, full_name, email, password_hash, phone, address, created_at
            FROM customers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Customer::try_from(&row).map_err(DbError::from)).transpose()
    }
}
