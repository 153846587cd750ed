//! Product catalog operations

use chrono::Utc;
use sqlx::Row;

use crate::error::DbError;
use crate::models::{NewProduct, Product};
use crate::repository::Database;

impl Database {
    /// Insert a new product
    pub async fn insert_product(&self, product: NewProduct) -> Result<Product, DbError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price_cents, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price_cents)
        .bind(now.to_rfc3339())
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = result.get("id");

        Ok(Product {
            id,
            name: product.name,
            description: product.description,
            price_cents: product.price_cents,
            created_at: now,
        })
    }

    /// List all products
    pub async fn list_products(&self) -> Result<Vec<Product>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price_cents, created_at
            FROM products
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Product::try_from(row).map_err(DbError::from))
            .collect()
    }
}
