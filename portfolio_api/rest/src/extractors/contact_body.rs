use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::Response,
    Form, Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{errors::submission_error, models::contact::ApiContactSubmission};

/// Contact form body sent either as json or as an urlencoded html form.
///
/// Bodies of any other content type carry no fields, so the submission is
/// reported as incomplete instead of being rejected.
pub struct ApiContactBody(pub ApiContactSubmission);

#[derive(Debug, Deserialize)]
struct ApiContactForm {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    message: Option<String>,
}

impl From<ApiContactForm> for ApiContactSubmission {
    fn from(value: ApiContactForm) -> Self {
        Self {
            name: value.name.map(Value::String),
            email: value.email.map(Value::String),
            phone: value.phone.map(Value::String),
            message: value.message.map(Value::String),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn of(request: &Request) -> Self {
        let Some(content_type) = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|x| x.to_str().ok())
        else {
            return Self::Other;
        };

        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/json" || essence.ends_with("+json") {
            Self::Json
        } else if essence == "application/x-www-form-urlencoded" {
            Self::Form
        } else {
            Self::Other
        }
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for ApiContactBody {
    type Rejection = Response;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let submission = match BodyKind::of(&request) {
            BodyKind::Json => Json::<ApiContactSubmission>::from_request(request, state)
                .await
                .map(|Json(body)| body)
                .map_err(|rejection| rejection.body_text()),
            BodyKind::Form => Form::<ApiContactForm>::from_request(request, state)
                .await
                .map(|Form(body)| body.into())
                .map_err(|rejection| rejection.body_text()),
            BodyKind::Other => Ok(ApiContactSubmission::default()),
        };

        submission.map(Self).map_err(|err| {
            debug!("rejecting contact form body: {err}");
            submission_error(StatusCode::BAD_REQUEST, err)
        })
    }
}
