//! Storage accessor for the `products` table.
//!
//! Every operation is a single parameterized statement. The only outcome
//! classified here is "no rows"; every other store failure is passed up as-is.

mod memory;
mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::{ensure_products_table, PgProductStore, CREATE_PRODUCTS_TABLE};

use crate::model::Product;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no matching row")]
    NotFound,
    #[error("database: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}

/// Turns an UPDATE/DELETE affected-row count into the not-found signal.
pub(crate) fn expect_affected(rows_affected: u64) -> Result<(), StoreError> {
    if rows_affected == 0 {
        Err(StoreError::NotFound)
    } else {
        Ok(())
    }
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Rows ordered by ascending id. Bounds are applied by the caller.
    async fn list_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>, StoreError>;

    async fn get_product(&self, id: i32) -> Result<Product, StoreError>;

    /// Inserts name and price; returns the stored row with its assigned id.
    async fn create_product(&self, product: Product) -> Result<Product, StoreError>;

    /// Overwrites name and price of the row at `product.id`. Zero affected rows is `NotFound`.
    async fn update_product(&self, product: Product) -> Result<Product, StoreError>;

    /// Zero affected rows is `NotFound`.
    async fn delete_product(&self, id: i32) -> Result<(), StoreError>;

    /// Round-trip used by the readiness probe.
    async fn ping(&self) -> Result<(), StoreError>;
}
