//! Runtime configuration read from the environment.

use std::{net::SocketAddr, time::Duration};
use thiserror::Error;
use tracing::warn;

pub const DEFAULT_DATABASE: &str = "sqlite://logbook.db";
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_AUTH_HEADER: &str = "X-Token";
const DEFAULT_AUTH_TOKEN: &str = "test";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// sqlx connection URL for the log database.
    pub database_url: String,
    pub addr: SocketAddr,
    pub max_connections: u32,
    /// Header carrying the shared secret.
    pub auth_header: String,
    pub auth_token: String,
    /// Deadline applied to each store call made on behalf of a request.
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from an arbitrary variable source. `from_env` uses the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url =
            lookup("LOGBOOK_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let addr = parse_var(&lookup, "LOGBOOK_ADDR", DEFAULT_ADDR.parse().ok())?;
        let max_connections = parse_var(&lookup, "LOGBOOK_MAX_CONNECTIONS", Some(5))?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "LOGBOOK_MAX_CONNECTIONS",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        let timeout_ms: u64 = parse_var(&lookup, "LOGBOOK_REQUEST_TIMEOUT_MS", Some(5_000))?;

        let auth_header =
            lookup("LOGBOOK_AUTH_HEADER").unwrap_or_else(|| DEFAULT_AUTH_HEADER.to_string());
        if axum::http::HeaderName::from_bytes(auth_header.as_bytes()).is_err() {
            return Err(ConfigError::Invalid {
                var: "LOGBOOK_AUTH_HEADER",
                value: auth_header,
                reason: "not a valid header name".into(),
            });
        }
        let auth_token = match lookup("LOGBOOK_AUTH_TOKEN") {
            Some(t) if !t.is_empty() => t,
            _ => {
                warn!("LOGBOOK_AUTH_TOKEN not set, using the built-in development token");
                DEFAULT_AUTH_TOKEN.to_string()
            }
        };

        Ok(Config {
            database_url,
            addr,
            max_connections,
            auth_header,
            auth_token,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: Option<T>) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match (lookup(var), default) {
        (Some(value), _) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
        (None, Some(d)) => Ok(d),
        (None, None) => Err(ConfigError::Invalid {
            var,
            value: String::new(),
            reason: "missing".into(),
        }),
    }
}
