//! JSON body extractor mapping every rejection (syntax, shape, content type) to 400.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

pub const INVALID_PAYLOAD_MESSAGE: &str = "Invalid request payload";

#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(AppError::BadRequest(format!(
                "{}: {}",
                INVALID_PAYLOAD_MESSAGE,
                rejection.body_text()
            ))),
        }
    }
}
