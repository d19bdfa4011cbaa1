use std::env;

use crate::error::AppError;

/// Where to listen and which match store to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs on the in-memory store.
    pub redis_url: Option<String>,
}

impl ServerConfig {
    /// Read `BACKEND_HOST`, `BACKEND_PORT` and `REDIS_URL`.
    ///
    /// `REDIS_ADDRESS` (`host:port`) is still honoured when `REDIS_URL` is unset.
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("BACKEND_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            Err(_) => 8080,
        };
        let redis_url = env::var("REDIS_URL").ok().or_else(|| {
            env::var("REDIS_ADDRESS")
                .ok()
                .map(|addr| format!("redis://{addr}"))
        });

        Ok(Self {
            host,
            port,
            redis_url,
        })
    }
}
