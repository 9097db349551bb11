//! Route tables and the assembled application router.

mod common;
mod product;

pub use common::common_routes;
pub use product::product_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Request bodies above this size are refused before any handler runs.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Full application: product CRUD plus health/readiness/version, with tracing and a body cap.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(product_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
}
