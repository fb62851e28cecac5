//! Log write, read and count handlers.

use crate::{app::AppState, http::error::ApiError, store::StoreError};
use axum::{
  Json,
  extract::{Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::error;

#[derive(Debug, Deserialize)]
pub struct PostBody {
  #[serde(default)]
  pub msgs: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReadParams {
  pub n: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WriteResponse {
  pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LogsResponse {
  pub logs: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
  pub count: u64,
}

/// Run a store call under the request deadline. On expiry the call's future
/// is dropped, which rolls back any transaction it had open.
async fn with_deadline<T, F>(state: &AppState, op: &'static str, fut: F) -> Result<T, ApiError>
where
  F: Future<Output = Result<T, StoreError>>,
{
  match tokio::time::timeout(state.request_timeout, fut).await {
    Ok(Ok(v)) => Ok(v),
    Ok(Err(e)) => {
      if !e.is_client_error() {
        error!("{op} error: {e}");
      }
      Err(e.into())
    }
    Err(_) => {
      error!("{op} timed out after {:?}", state.request_timeout);
      Err(ApiError::Timeout)
    }
  }
}

pub async fn write_logs(
  State(state): State<AppState>,
  body: Result<Json<PostBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  if body.msgs.is_empty() {
    return Err(ApiError::BadRequest("msgs should not be empty".into()));
  }
  with_deadline(&state, "write_logs", state.store.append(&body.msgs)).await?;
  Ok((
    StatusCode::CREATED,
    Json(WriteResponse {
      message: "message(s) successfully logged",
    }),
  ))
}

pub async fn read_logs(
  State(state): State<AppState>,
  Query(params): Query<ReadParams>,
) -> Result<Json<LogsResponse>, ApiError> {
  let limit = params.n.unwrap_or_default();
  let logs = with_deadline(&state, "read_logs", state.store.query(&limit)).await?;
  Ok(Json(LogsResponse { logs }))
}

pub async fn count_logs(State(state): State<AppState>) -> Result<Json<CountResponse>, ApiError> {
  let count = with_deadline(&state, "count_logs", state.store.count()).await?;
  Ok(Json(CountResponse { count }))
}
