use std::time::Duration;

use axum::{extract::Request, response::Response, Router};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn, Span};

use super::{client_ip::ClientIp, request_id};

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(request_span)
            .on_request(|_: &Request, _: &Span| debug!("request received"))
            .on_response(log_response)
            .on_body_chunk(())
            .on_eos(())
            .on_failure(()),
    )
}

fn request_span(request: &Request) -> Span {
    let client_ip = request
        .extensions()
        .get::<ClientIp>()
        .copied()
        .unwrap_or(ClientIp(None));

    tracing::debug_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
        %client_ip,
        request_id = request_id::get(request),
    )
}

fn log_response(response: &Response, latency: Duration, _span: &Span) {
    let status = response.status();
    if status.is_server_error() {
        warn!(%status, ?latency, "request failed");
    } else {
        debug!(%status, ?latency, "request completed");
    }
}
