//! HTTP error responses.

use crate::store::StoreError;
use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;

/// Errors a handler can answer with. Bodies are `{"error": "..."}`.
#[derive(Debug)]
pub enum ApiError {
  /// Request body or parameters were unusable.
  BadRequest(String),
  Store(StoreError),
  /// The store did not answer within the request deadline.
  Timeout,
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
    }
  }

  fn message(&self) -> String {
    match self {
      ApiError::BadRequest(m) => m.clone(),
      ApiError::Store(e) => e.to_string(),
      ApiError::Timeout => "request deadline exceeded".to_string(),
    }
  }
}

impl From<StoreError> for ApiError {
  fn from(err: StoreError) -> Self {
    ApiError::Store(err)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    (self.status(), Json(json!({ "error": self.message() }))).into_response()
  }
}
