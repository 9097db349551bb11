//! Products API: REST CRUD over a single PostgreSQL `products` table.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, ConfigError};
pub use model::Product;
pub use routes::{app, common_routes, product_routes};
pub use state::AppState;
pub use store::{ensure_products_table, MemoryProductStore, PgProductStore, ProductStore, StoreError};
