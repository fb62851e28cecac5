//! HTTP router and handlers.

use crate::{app::AppState, auth};
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub mod error;
pub mod logs;

/// Assemble the HTTP router. Every request, including unknown paths and
/// methods, goes through the token check.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(logs::write_logs).get(logs::read_logs))
        .route("/count", get(logs::count_logs))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ))
        .with_state(state)
}
