use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::state::MatchId;
use crate::error::AppError;
use crate::errors::ErrorCode;

/// Match id taken from the `{match_id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPath(pub MatchId);

impl FromRequest for MatchPath {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<MatchPath, AppError> {
    let raw = req.match_info().get("match_id").ok_or_else(|| {
        AppError::invalid(ErrorCode::InvalidMatchId, "Missing match_id parameter")
    })?;

    raw.parse::<MatchId>().map(MatchPath).map_err(|_| {
        AppError::invalid(ErrorCode::InvalidMatchId, format!("Invalid match id: {raw}"))
    })
}
