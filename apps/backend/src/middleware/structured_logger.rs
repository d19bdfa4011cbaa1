use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::extractors::player_cookie::PLAYER_COOKIE;

/// Emits one `request_completed` event per request.
///
/// Level follows the status class: error for 5xx, warn for 4xx, info
/// otherwise. Match routes also carry the `match_id` and `pit` segments.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// What is known about a request before it is handled.
struct RequestLog {
    start: Instant,
    method: String,
    path: String,
    has_player: bool,
}

impl RequestLog {
    fn emit(self, status: StatusCode, match_id: Option<&str>, pit: Option<&str>) {
        let duration_us = u64::try_from(self.start.elapsed().as_micros()).unwrap_or(u64::MAX);
        let status_code = status.as_u16();
        let (method, path, has_player) = (self.method, self.path, self.has_player);
        let match_id = match_id.unwrap_or("-");
        let pit = pit.unwrap_or("-");

        if status.is_server_error() {
            error!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, has_player, match_id, pit, message = "request_completed");
        } else if status.is_client_error() {
            warn!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, has_player, match_id, pit, message = "request_completed");
        } else {
            info!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, has_player, match_id, pit, message = "request_completed");
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let log = RequestLog {
            start: Instant::now(),
            method: req.method().to_string(),
            path: req.path().to_string(),
            has_player: req.cookie(PLAYER_COOKIE).is_some(),
        };

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            match &result {
                // Path segments are only known once the router has matched.
                Ok(res) => {
                    let params = res.request().match_info();
                    log.emit(res.status(), params.get("match_id"), params.get("pit"));
                }
                Err(err) => log.emit(err.as_response_error().status_code(), None, None),
            }

            result
        })
    }
}
