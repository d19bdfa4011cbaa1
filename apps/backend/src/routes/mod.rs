use actix_web::web;

pub mod health;
pub mod matches;

/// Register every route. `/health` goes first so it is not taken for a match id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.configure(matches::configure_routes);
}
