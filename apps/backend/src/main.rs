use actix_web::{web, App, HttpServer};
use mancala_backend::config::dealer::DealerConfig;
use mancala_backend::config::server::ServerConfig;
use mancala_backend::infra::state::build_state;
use mancala_backend::middleware::panic_guard::PanicGuard;
use mancala_backend::middleware::structured_logger::StructuredLogger;
use mancala_backend::routes;
use tracing::{error, info, warn};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker-compose env_file, or `set -a; . ./.env; set +a` locally).
    let server = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid server configuration");
            std::process::exit(1);
        }
    };
    let dealer = match DealerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid dealer configuration");
            std::process::exit(1);
        }
    };

    let mut builder = build_state().with_dealer_config(dealer);
    match &server.redis_url {
        Some(url) => builder = builder.with_redis(url.clone()),
        None => warn!("REDIS_URL not set, matches are kept in memory only"),
    }

    let app_state = match builder.build().await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %server.host, port = server.port, "Starting Mancala backend");

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(PanicGuard)
            .wrap(StructuredLogger)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
