//! Match HTTP routes.

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use tracing::debug;

use crate::domain::player_view::PlayerView;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::match_id::MatchPath;
use crate::extractors::player_cookie::PlayerCookie;
use crate::state::app_state::AppState;

/// GET /
///
/// Joins a waiting match or opens a new one. The assigned player id is
/// returned as the `player_id` cookie.
async fn join(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let (joined, player) = app_state.dealer().join_match().await?;

    Ok(HttpResponse::Ok()
        .cookie(PlayerCookie::cookie(player))
        .json(PlayerView::for_player(&joined, player)))
}

/// GET /{match_id}
///
/// The match as seen by the calling player, their own row first.
async fn get_match(
    match_id: MatchPath,
    player: PlayerCookie,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let found = app_state.dealer().get_match(match_id.0, player.0).await?;

    Ok(HttpResponse::Ok()
        .cookie(PlayerCookie::cookie(player.0))
        .json(PlayerView::for_player(&found, player.0)))
}

/// PUT /{match_id}/{pit}
///
/// 202 when the move was queued, 204 when it was turned away (not the
/// caller's turn, or another move is still running). The move is applied
/// asynchronously; poll `GET /{match_id}` for the result.
async fn make_move(
    match_id: MatchPath,
    pit: web::Path<(String, String)>,
    player: PlayerCookie,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (_, raw_pit) = pit.into_inner();
    let pit = raw_pit.parse::<i64>().map_err(|_| {
        AppError::invalid(ErrorCode::InvalidPit, format!("Invalid pit: {raw_pit}"))
    })?;

    let dealer = app_state.dealer();
    let snapshot = dealer.get_match(match_id.0, player.0).await?;
    let acceptance = dealer.make_move(pit, &snapshot, player.0).await?;

    let status = if acceptance.is_accepted() {
        StatusCode::ACCEPTED
    } else {
        debug!(match_id = %match_id.0, pit, ?acceptance, "Move not accepted");
        StatusCode::NO_CONTENT
    };

    Ok(HttpResponse::build(status)
        .cookie(PlayerCookie::cookie(player.0))
        .finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(join))
        .route("/{match_id}", web::get().to(get_match))
        .route("/{match_id}/{pit}", web::put().to(make_move));
}
