use std::future::{ready, Ready};

use actix_web::cookie::Cookie;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::state::PlayerId;
use crate::error::AppError;

/// Name of the cookie carrying the caller's player id.
pub const PLAYER_COOKIE: &str = "player_id";

/// Player identity read from the `player_id` cookie.
///
/// A missing or malformed cookie is rejected with 401 `MISSING_PLAYER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerCookie(pub PlayerId);

impl PlayerCookie {
    /// Cookie handed back to the client so later requests identify the player.
    pub fn cookie(player: PlayerId) -> Cookie<'static> {
        Cookie::build(PLAYER_COOKIE, player.to_string())
            .path("/")
            .http_only(true)
            .finish()
    }
}

impl FromRequest for PlayerCookie {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<PlayerCookie, AppError> {
    let cookie = req
        .cookie(PLAYER_COOKIE)
        .ok_or_else(|| AppError::unauthorized("missing player_id cookie"))?;

    cookie
        .value()
        .parse::<PlayerId>()
        .map(PlayerCookie)
        .map_err(|_| AppError::unauthorized("player_id cookie is not a valid id"))
}
