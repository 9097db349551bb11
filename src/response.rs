//! Success body helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct ResultBody {
    pub result: &'static str,
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

/// `{"result":"success"}`
pub fn success() -> (StatusCode, Json<ResultBody>) {
    ok(ResultBody { result: "success" })
}
