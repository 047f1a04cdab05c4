use std::sync::Arc;

use portfolio_auth_contracts::AdminAuthService;
use portfolio_di::Build;
use portfolio_models::auth::{AdminAuthError, AdminKey};
use portfolio_utils::trace_instrument;
use tracing::debug;

#[derive(Debug, Clone, Build)]
pub struct AdminAuthServiceImpl {
    config: AdminAuthServiceConfig,
}

#[derive(Debug, Clone, Default)]
pub struct AdminAuthServiceConfig {
    pub secret: Option<Arc<AdminKey>>,
}

impl AdminAuthService for AdminAuthServiceImpl {
    #[trace_instrument(skip(self))]
    fn authenticate_admin(&self, key: Option<AdminKey>) -> Result<(), AdminAuthError> {
        let key = key
            .filter(|key| !key.as_str().is_empty())
            .ok_or(AdminAuthError::Missing)?;

        let Some(secret) = self.config.secret.as_deref() else {
            debug!("rejecting admin key because no admin secret is configured");
            return Err(AdminAuthError::Invalid);
        };

        if key != *secret {
            return Err(AdminAuthError::Invalid);
        }

        Ok(())
    }
}
