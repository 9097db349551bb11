//! Typed errors and HTTP mapping.

use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub const NOT_FOUND_MESSAGE: &str = "Product not found";
pub const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::Database(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest(msg) => {
                tracing::warn!(%msg, "rejected request");
                msg
            }
            AppError::Store(StoreError::NotFound) => NOT_FOUND_MESSAGE.to_string(),
            AppError::Store(StoreError::Database(e)) => {
                tracing::error!(error = %e, "store failure");
                INTERNAL_MESSAGE.to_string()
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
