use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use portfolio_core_contact_contracts::{
    ContactFeatureService, ContactListError, ContactSubmitError,
};
use portfolio_models::{auth::AdminAuthError, pagination::PageRequest};

use super::not_found;
use crate::{
    errors::{error, internal_server_error, submission_error},
    extractors::{admin_key::ApiAdminKey, contact_body::ApiContactBody},
    models::contact::{ApiContactPage, ApiContactSubmitted, ApiPageQuery},
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(submit).fallback(not_found))
        .route("/admin/contacts", routing::get(list).fallback(not_found))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    ApiContactBody(submission): ApiContactBody,
) -> Response {
    match service.submit(submission.into()).await {
        Ok(contact_id) => Json(ApiContactSubmitted::from(contact_id)).into_response(),
        Err(ContactSubmitError::Other(err)) => {
            tracing::error!("failed to store contact: {err:#}");
            submission_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to send message")
        }
        Err(err) => submission_error(StatusCode::BAD_REQUEST, err.to_string()),
    }
}

async fn list(
    service: State<Arc<impl ContactFeatureService>>,
    ApiAdminKey(admin_key): ApiAdminKey,
    query: Option<Query<Vec<(String, String)>>>,
) -> Response {
    let query = query
        .map(|Query(pairs)| ApiPageQuery::from_pairs(pairs))
        .unwrap_or_default();
    let request = PageRequest::parse(query.page.as_deref(), query.limit.as_deref());

    match service.list(admin_key, request).await {
        Ok(page) => Json(ApiContactPage::from(page)).into_response(),
        Err(ContactListError::Auth(AdminAuthError::Missing)) => {
            error(StatusCode::UNAUTHORIZED, "Admin authentication required")
        }
        Err(ContactListError::Auth(AdminAuthError::Invalid)) => {
            error(StatusCode::FORBIDDEN, "Invalid admin key")
        }
        Err(ContactListError::Other(err)) => internal_server_error(err, "Failed to fetch contacts"),
    }
}
