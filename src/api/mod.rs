//! REST API module.
//!
//! Handlers return bare documents; failures render through `AppError`.

mod profile;
mod tanks;

pub use profile::*;
pub use tanks::*;

use axum::{
    extract::FromRequest,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{ser::SerializeTuple, Serialize, Serializer};

use crate::errors::AppError;

/// JSON body extractor whose rejections become `AppError`s.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Success response: a status code plus an optional JSON body.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub status: StatusCode,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self {
            status,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// A status with an empty body.
    pub fn empty(status: StatusCode) -> Self {
        Self { status, data: None }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self.data {
            Some(data) => (self.status, Json(data)).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// 200 with a body.
pub fn ok<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(StatusCode::OK, data))
}

/// 201 with the stored document.
pub fn created<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(StatusCode::CREATED, data))
}

/// A lookup result that renders as the empty JSON array when nothing was found.
#[derive(Debug)]
pub struct OrEmpty<T>(pub Option<T>);

impl<T: Serialize> Serialize for OrEmpty<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_tuple(0)?.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_or_empty_renders_empty_array() {
        let empty: OrEmpty<u32> = OrEmpty(None);
        assert_eq!(serde_json::to_string(&empty).unwrap(), "[]");
        assert_eq!(serde_json::to_string(&OrEmpty(Some(7))).unwrap(), "7");
    }

    #[test]
    fn test_empty_response_has_status_only() {
        let response = ApiResponse::empty(StatusCode::ACCEPTED).into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert!(response.headers().get("content-type").is_none());
    }
}
