use std::{any::Any, panic::AssertUnwindSafe};

use anyhow::anyhow;
use axum::{
    extract::Request,
    middleware::{from_fn, Next},
    response::Response,
    Router,
};
use futures::FutureExt;
use portfolio_models::environment::Environment;

use crate::errors::{internal_server_error, INTERNAL_SERVER_ERROR};

/// Turns a panicking request handler into a 500 response.
///
/// Outside of production the panic message is sent to the client.
pub fn add<S: Clone + Send + Sync + 'static>(
    environment: Environment,
) -> impl FnOnce(Router<S>) -> Router<S> {
    let expose_details = !environment.is_production();
    move |router| {
        router.layer(from_fn(move |request: Request, next: Next| {
            middleware(request, next, expose_details)
        }))
    }
}

async fn middleware(request: Request, next: Next, expose_details: bool) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(payload) => {
            let message = panic_message(&*payload);
            let public = if expose_details {
                message.as_str()
            } else {
                INTERNAL_SERVER_ERROR
            };
            internal_server_error(anyhow!("request handler panicked: {message}"), public)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|&s| s.to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| INTERNAL_SERVER_ERROR.to_owned())
}
