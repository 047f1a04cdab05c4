use axum::{extract::OriginalUri, http::StatusCode, response::Response};

use crate::errors::error;

pub mod contact;
pub mod health;

pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    let route = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |x| x.as_str());
    error(StatusCode::NOT_FOUND, format!("Route {route} not found"))
}
