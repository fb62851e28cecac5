//! Shared-secret header authentication.

use crate::app::AppState;
use axum::{
  extract::{Request, State},
  http::StatusCode,
  middleware::Next,
  response::{IntoResponse, Response},
};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

/// Expected header name and value.
#[derive(Clone)]
pub struct HeaderAuth {
  header: String,
  token: String,
}

impl std::fmt::Debug for HeaderAuth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("HeaderAuth")
      .field("header", &self.header)
      .finish_non_exhaustive()
  }
}

impl HeaderAuth {
  pub fn new(header: impl Into<String>, token: impl Into<String>) -> Self {
    Self {
      header: header.into(),
      token: token.into(),
    }
  }

  pub fn header(&self) -> &str {
    &self.header
  }

  /// True only when `presented` equals the secret byte for byte.
  pub fn authenticate(&self, presented: &str) -> bool {
    presented.as_bytes().ct_eq(self.token.as_bytes()).into()
  }
}

/// Reject the request with an empty 401 unless the configured header
/// carries the secret.
pub async fn require_token(State(state): State<AppState>, req: Request, next: Next) -> Response {
  let auth = &state.auth;
  let rejection = match req
    .headers()
    .get(auth.header())
    .and_then(|v| v.to_str().ok())
  {
    Some(value) if auth.authenticate(value) => None,
    Some(_) => Some("wrong token"),
    None => Some("header missing"),
  };
  match rejection {
    None => {
      debug!(header = auth.header(), "auth success");
      next.run(req).await
    }
    Some(reason) => {
      warn!(header = auth.header(), method = %req.method(), uri = %req.uri(), "auth failure: {reason}");
      StatusCode::UNAUTHORIZED.into_response()
    }
  }
}
