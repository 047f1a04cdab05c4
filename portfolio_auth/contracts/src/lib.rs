use portfolio_models::auth::{AdminAuthError, AdminKey};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait AdminAuthService: Send + Sync + 'static {
    /// Checks the admin key sent with a request against the configured
    /// secret.
    ///
    /// A missing or empty key fails with [`AdminAuthError::Missing`]. Any
    /// other key fails with [`AdminAuthError::Invalid`] unless it is exactly
    /// equal to the secret. If no secret has been configured, every key is
    /// invalid.
    fn authenticate_admin(&self, key: Option<AdminKey>) -> Result<(), AdminAuthError>;
}

#[cfg(feature = "mock")]
impl MockAdminAuthService {
    pub fn with_authenticate_admin(
        mut self,
        key: Option<AdminKey>,
        result: Result<(), AdminAuthError>,
    ) -> Self {
        self.expect_authenticate_admin()
            .once()
            .with(mockall::predicate::eq(key))
            .return_const(result);
        self
    }
}
