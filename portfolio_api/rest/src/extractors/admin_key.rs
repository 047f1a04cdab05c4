use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use portfolio_models::auth::AdminKey;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Extract the admin key from the `x-admin-key` header, if present.
pub struct ApiAdminKey(pub Option<AdminKey>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for ApiAdminKey {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .headers
                .get(ADMIN_KEY_HEADER)
                .map(|x| String::from_utf8_lossy(x.as_bytes()).into_owned().into()),
        ))
    }
}
