//! Tags every request with an `X-Request-Id`.
//!
//! An id sent by a proxy in front of the api is kept, otherwise a new one is
//! generated. The id is echoed in the response headers.

use axum::{
    http::{HeaderValue, Request},
    Router,
};
use base64::{display::Base64Display, engine::general_purpose::STANDARD_NO_PAD};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeTimeOrderedId))
}

/// The id of the current request, or `-` if it has none.
pub fn get<B>(request: &Request<B>) -> &str {
    request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("-")
}

/// UUIDv7 encoded as unpadded base64, so ids sort by creation time.
#[derive(Debug, Clone, Copy)]
struct MakeTimeOrderedId;

impl MakeRequestId for MakeTimeOrderedId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        encode(Uuid::now_v7()).map(RequestId::new)
    }
}

fn encode(id: Uuid) -> Option<HeaderValue> {
    let encoded = Base64Display::new(id.as_bytes(), &STANDARD_NO_PAD).to_string();
    HeaderValue::from_str(&encoded).ok()
}
