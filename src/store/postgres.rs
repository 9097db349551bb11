//! PostgreSQL implementation over a shared `PgPool`.

use super::{expect_affected, ProductStore, StoreError};
use crate::model::Product;
use async_trait::async_trait;
use sqlx::PgPool;

pub const CREATE_PRODUCTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL,
        name TEXT NOT NULL,
        price NUMERIC(10,2) NOT NULL DEFAULT 0.00,
        CONSTRAINT products_pkey PRIMARY KEY (id)
    )
"#;

const SELECT_PAGE: &str = "SELECT id, name, price FROM products ORDER BY id LIMIT $1 OFFSET $2";
const SELECT_ONE: &str = "SELECT id, name, price FROM products WHERE id = $1";
const INSERT: &str = "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING id, name, price";
const UPDATE: &str = "UPDATE products SET name = $1, price = $2 WHERE id = $3";
const DELETE: &str = "DELETE FROM products WHERE id = $1";

/// Create the `products` table if it does not exist yet.
pub async fn ensure_products_table(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(CREATE_PRODUCTS_TABLE).execute(pool).await?;
    Ok(())
}

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>, StoreError> {
        tracing::debug!(sql = SELECT_PAGE, limit, offset, "query");
        let rows = sqlx::query_as::<_, Product>(SELECT_PAGE)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_product(&self, id: i32) -> Result<Product, StoreError> {
        tracing::debug!(sql = SELECT_ONE, id, "query");
        let row = sqlx::query_as::<_, Product>(SELECT_ONE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or(StoreError::NotFound)
    }

    async fn create_product(&self, product: Product) -> Result<Product, StoreError> {
        tracing::debug!(sql = INSERT, name = %product.name, price = %product.price, "query");
        let row = sqlx::query_as::<_, Product>(INSERT)
            .bind(&product.name)
            .bind(product.price)
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::Database)?;
        Ok(row)
    }

    async fn update_product(&self, product: Product) -> Result<Product, StoreError> {
        tracing::debug!(sql = UPDATE, id = product.id, name = %product.name, price = %product.price, "query");
        let result = sqlx::query(UPDATE)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.id)
            .execute(&self.pool)
            .await?;
        expect_affected(result.rows_affected())?;
        Ok(product.normalized())
    }

    async fn delete_product(&self, id: i32) -> Result<(), StoreError> {
        tracing::debug!(sql = DELETE, id, "query");
        let result = sqlx::query(DELETE).bind(id).execute(&self.pool).await?;
        expect_affected(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
