//! Application setup and runtime.

use crate::{
  auth::HeaderAuth,
  config::Config,
  db, http,
  store::{LogStore, SqliteLogStore},
};
use std::{sync::Arc, time::Duration};
use tokio::signal;
use tracing::info;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn LogStore>,
  pub auth: HeaderAuth,
  pub request_timeout: Duration,
}

impl AppState {
  pub fn new(store: Arc<dyn LogStore>, config: &Config) -> Self {
    Self {
      store,
      auth: HeaderAuth::new(&config.auth_header, &config.auth_token),
      request_timeout: config.request_timeout,
    }
  }
}

/// Load config, prepare the database and serve HTTP until shutdown.
pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  crate::util::init_tracing();

  let config = Config::from_env()?;
  let pool = db::connect(&config.database_url, config.max_connections).await?;
  db::ensure_schema(&pool).await?;

  let store: Arc<dyn LogStore> = Arc::new(SqliteLogStore::new(pool.clone()));
  let app = http::build_router(AppState::new(store, &config));

  let listener = tokio::net::TcpListener::bind(config.addr).await?;
  info!("logbook listening on http://{}/", listener.local_addr()?);
  info!("database: {}", config.database_url);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  pool.close().await;
  info!("server shut down gracefully");
  Ok(())
}

/// Resolve on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!("failed to listen for Ctrl+C: {e}");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!("failed to install SIGTERM handler: {e}");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => info!("received SIGINT, shutting down"),
    _ = terminate => info!("received SIGTERM, shutting down"),
  }
}
