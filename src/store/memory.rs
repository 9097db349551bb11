//! In-process store with the same observable behaviour as the PostgreSQL one.
//! Used as the substitute store when exercising the router without a database.

use super::{ProductStore, StoreError};
use crate::model::Product;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct Table {
    rows: BTreeMap<i32, Product>,
    next_id: i32,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryProductStore {
    table: Mutex<Table>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the table and restart the id sequence at 1.
    pub fn reset(&self) {
        *self.lock() = Table::default();
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        // Every critical section leaves the table consistent, so a poisoned lock is still usable.
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>, StoreError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let offset = usize::try_from(offset).unwrap_or(0);
        Ok(self.lock().rows.values().skip(offset).take(limit).cloned().collect())
    }

    async fn get_product(&self, id: i32) -> Result<Product, StoreError> {
        self.lock().rows.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn create_product(&self, product: Product) -> Result<Product, StoreError> {
        let mut table = self.lock();
        let mut row = product.normalized();
        row.id = table.next_id;
        table.next_id += 1;
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_product(&self, product: Product) -> Result<Product, StoreError> {
        let mut table = self.lock();
        let row = table.rows.get_mut(&product.id).ok_or(StoreError::NotFound)?;
        *row = product.normalized();
        Ok(row.clone())
    }

    async fn delete_product(&self, id: i32) -> Result<(), StoreError> {
        self.lock().rows.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
