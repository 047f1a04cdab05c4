use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::ORIGIN, request::Parts, HeaderValue, StatusCode},
    middleware::{from_fn_with_state, Next},
    response::Response,
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::debug;

use crate::errors::error;

pub const ORIGIN_NOT_ALLOWED: &str = "Not allowed by CORS";

/// Origins which may call the api from a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsPolicy {
    /// Exact origins, e.g. the deployed frontend and local dev servers.
    pub origins: Vec<String>,
    /// Any origin ending in this suffix is allowed, e.g. `.vercel.app` for
    /// preview deployments.
    pub preview_suffix: Option<String>,
}

impl CorsPolicy {
    /// Requests without an `Origin` header are always allowed.
    pub fn allows_header(&self, origin: Option<&HeaderValue>) -> bool {
        origin.map_or(true, |origin| {
            origin.to_str().is_ok_and(|origin| self.allows(origin))
        })
    }

    pub fn allows(&self, origin: &str) -> bool {
        self.origins.iter().any(|allowed| allowed == origin)
            || self
                .preview_suffix
                .as_deref()
                .is_some_and(|suffix| !suffix.is_empty() && origin.ends_with(suffix))
    }
}

/// Requests without an `Origin` header are never affected. Preflight
/// requests from other origins are answered without CORS headers, any other
/// request from them is rejected with a 403 before reaching a handler.
pub fn add<S: Clone + Send + Sync + 'static>(
    policy: Arc<CorsPolicy>,
) -> impl FnOnce(Router<S>) -> Router<S> {
    move |router| {
        let predicate_policy = Arc::clone(&policy);
        router
            .layer(from_fn_with_state(policy, reject_disallowed_origin))
            .layer(
                CorsLayer::new()
                    .allow_origin(AllowOrigin::predicate(
                        move |origin: &HeaderValue, _: &Parts| {
                            predicate_policy.allows_header(Some(origin))
                        },
                    ))
                    .allow_methods(AllowMethods::mirror_request())
                    .allow_headers(AllowHeaders::mirror_request())
                    .allow_credentials(true),
            )
    }
}

async fn reject_disallowed_origin(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request.headers().get(ORIGIN);
    if !policy.allows_header(origin) {
        debug!(?origin, "rejecting request from disallowed origin");
        return error(StatusCode::FORBIDDEN, ORIGIN_NOT_ALLOWED);
    }
    next.run(request).await
}
