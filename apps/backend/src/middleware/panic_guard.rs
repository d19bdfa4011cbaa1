//! Turns a panic inside a handler into a 500 problem response.

use std::any::Any;
use std::future::{ready, Ready};
use std::panic::AssertUnwindSafe;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error as ActixError;
use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use tracing::error;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub struct PanicGuard;

impl<S, B> Transform<S, ServiceRequest> for PanicGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = PanicGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PanicGuardMiddleware { service }))
    }
}

pub struct PanicGuardMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for PanicGuardMiddleware<S>
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
        // Owned copies only: the router needs sole ownership of the request.
        let method = req.method().to_string();
        let path = req.path().to_string();

        // A panic while building the future must be caught too.
        let fut = match std::panic::catch_unwind(AssertUnwindSafe(|| self.service.call(req))) {
            Ok(fut) => fut,
            Err(payload) => {
                let err = recovered(&method, &path, payload.as_ref());
                return Box::pin(async move { Err(err) });
            }
        };

        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(result) => result,
                Err(payload) => Err(recovered(&method, &path, payload.as_ref())),
            }
        })
    }
}

/// Log the panic and produce the error actix renders as the 500 response.
fn recovered(method: &str, path: &str, payload: &(dyn Any + Send)) -> ActixError {
    let message = panic_message(payload);
    error!(http.method = %method, url.path = %path, panic = %message, "Handler panicked");
    AppError::internal(ErrorCode::InternalError, "internal server error").into()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
