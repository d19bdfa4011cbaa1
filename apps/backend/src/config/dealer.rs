use std::env;
use std::time::Duration;

use crate::error::AppError;

/// Workers per pipeline pool unless overridden.
pub const DEFAULT_WORKERS: usize = 100;
/// Lifetime of the per-match advisory lock unless overridden.
pub const DEFAULT_LOCK_TTL: Duration = Duration::from_millis(1000);

/// Sizing of the move pipeline and the advisory lock window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerConfig {
    /// Sowing lanes (one task each).
    pub sow_workers: usize,
    /// Completion lanes (one task each).
    pub completion_workers: usize,
    pub lock_ttl: Duration,
}

impl Default for DealerConfig {
    fn default() -> Self {
        Self {
            sow_workers: DEFAULT_WORKERS,
            completion_workers: DEFAULT_WORKERS,
            lock_ttl: DEFAULT_LOCK_TTL,
        }
    }
}

impl DealerConfig {
    /// Read `MANCALA_SOW_WORKERS`, `MANCALA_COMPLETION_WORKERS` and
    /// `MANCALA_LOCK_TTL_MS`, falling back to the defaults for unset values.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let sow_workers = workers_var("MANCALA_SOW_WORKERS")?.unwrap_or(defaults.sow_workers);
        let completion_workers =
            workers_var("MANCALA_COMPLETION_WORKERS")?.unwrap_or(defaults.completion_workers);
        let lock_ttl = match parse_var::<u64>("MANCALA_LOCK_TTL_MS")? {
            Some(0) => {
                return Err(AppError::config(
                    "MANCALA_LOCK_TTL_MS must be greater than zero",
                ))
            }
            Some(ms) => Duration::from_millis(ms),
            None => defaults.lock_ttl,
        };

        Ok(Self {
            sow_workers,
            completion_workers,
            lock_ttl,
        })
    }
}

fn workers_var(name: &str) -> Result<Option<usize>, AppError> {
    match parse_var::<usize>(name)? {
        Some(0) => Err(AppError::config(format!("{name} must be at least 1"))),
        other => Ok(other),
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::config(format!("{name} has an invalid value: '{raw}'"))),
        Err(_) => Ok(None),
    }
}
