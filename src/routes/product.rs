//! Product CRUD routes.

use crate::handlers::{create_product, delete_product, get_product, list_products, update_product};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/product", post(create_product))
        .route(
            "/product/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}
