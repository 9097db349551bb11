//! Extract the integer product id from the `{id}` path segment.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

pub const INVALID_ID_MESSAGE: &str = "Invalid product ID";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for ProductId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        raw.trim()
            .parse::<i32>()
            .map(ProductId)
            .map_err(|_| AppError::BadRequest(INVALID_ID_MESSAGE.into()))
    }
}
