#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::dealer::DealerConfig;
pub use config::server::ServerConfig;
pub use error::AppError;
pub use errors::domain::DomainError;
pub use extractors::player_cookie::PlayerCookie;
pub use infra::state::build_state;
pub use middleware::panic_guard::PanicGuard;
pub use middleware::structured_logger::StructuredLogger;
pub use repos::{InMemoryMatchRepo, MatchRepo, RedisMatchRepo, SharedMatchRepo};
pub use services::dealer::{MatchDealer, MoveAcceptance, RejectReason};
pub use services::pipeline::{MovePipeline, MoveReport};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
