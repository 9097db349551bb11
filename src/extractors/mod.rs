//! Request extractors that reject with `AppError` so clients always get a JSON error body.

pub mod body;
pub mod product_id;

pub use body::JsonBody;
pub use product_id::ProductId;
