//! Product CRUD handlers: list, read, create, update, delete.
//! Each handler makes exactly one store call; decoding failures return 400 before it.

use crate::error::AppError;
use crate::extractors::{JsonBody, ProductId};
use crate::model::Product;
use crate::response::{created, ok, success};
use crate::state::AppState;
use axum::extract::{Query, State};
use std::collections::HashMap;

pub const DEFAULT_COUNT: i64 = 10;
pub const MAX_COUNT: i64 = 10;

/// `count`/`start` query window forwarded to the store as limit/offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListWindow {
    pub limit: i64,
    pub offset: i64,
}

impl ListWindow {
    /// Out-of-range or unparsable values fall back to the defaults instead of failing.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let count = params
            .get("count")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|c| (1..=MAX_COUNT).contains(c))
            .unwrap_or(DEFAULT_COUNT);
        let start = params
            .get("start")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|s| *s >= 0)
            .unwrap_or(0);
        ListWindow {
            limit: count,
            offset: start,
        }
    }
}

/// GET /products
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let window = ListWindow::from_params(&params);
    let rows = state.store.list_products(window.limit, window.offset).await?;
    Ok(ok(rows))
}

/// GET /product/:id
pub async fn get_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let row = state.store.get_product(id).await?;
    Ok(ok(row))
}

/// POST /product
pub async fn create_product(
    State(state): State<AppState>,
    JsonBody(product): JsonBody<Product>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let row = state.store.create_product(product).await?;
    tracing::info!(id = row.id, "product created");
    Ok(created(row))
}

/// PUT /product/:id
pub async fn update_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
    JsonBody(mut product): JsonBody<Product>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    product.id = id;
    let row = state.store.update_product(product).await?;
    Ok(ok(row))
}

/// DELETE /product/:id
pub async fn delete_product(
    State(state): State<AppState>,
    ProductId(id): ProductId,
) -> Result<impl axum::response::IntoResponse, AppError> {
    state.store.delete_product(id).await?;
    tracing::info!(id, "product deleted");
    Ok(success())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(pairs: &[(&str, &str)]) -> ListWindow {
        let params = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ListWindow::from_params(&params)
    }

    #[test]
    fn defaults_when_absent() {
        assert_eq!(window(&[]), ListWindow { limit: 10, offset: 0 });
    }

    #[test]
    fn in_range_values_pass_through() {
        assert_eq!(window(&[("count", "3"), ("start", "4")]), ListWindow { limit: 3, offset: 4 });
    }

    #[test]
    fn out_of_range_and_garbage_fall_back() {
        assert_eq!(window(&[("count", "0")]).limit, 10);
        assert_eq!(window(&[("count", "11")]).limit, 10);
        assert_eq!(window(&[("count", "many")]).limit, 10);
        assert_eq!(window(&[("start", "-1")]).offset, 0);
        assert_eq!(window(&[("start", "x")]).offset, 0);
    }
}
