use std::future::Future;

use portfolio_models::{
    auth::{AdminAuthError, AdminKey},
    contact::{ContactId, ContactRecord, ContactSubmission},
    pagination::{PageMeta, PageRequest},
};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validates a contact form submission and stores it as a new contact
    /// record.
    ///
    /// Validation stops at the first failing check.
    fn submit(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = Result<ContactId, ContactSubmitError>> + Send;

    /// Returns one page of the stored contact records, newest first.
    ///
    /// Requires the admin key.
    fn list(
        &self,
        admin_key: Option<AdminKey>,
        request: PageRequest,
    ) -> impl Future<Output = Result<ContactPage, ContactListError>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactPage {
    pub records: Vec<ContactRecord>,
    pub meta: PageMeta,
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("All fields are required: name, email, phone, and message")]
    MissingFields,
    #[error("All fields must be valid strings")]
    NotStrings,
    #[error("All fields must contain valid content (not just whitespace)")]
    Blank,
    #[error("Please provide a valid name (alphabets only)")]
    InvalidName,
    #[error("Please provide a valid email address")]
    InvalidEmail,
    #[error("Please provide a valid phone number")]
    InvalidPhone,
    #[error("Message cannot be empty")]
    InvalidMessage,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ContactListError {
    #[error(transparent)]
    Auth(#[from] AdminAuthError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        submission: ContactSubmission,
        result: Result<ContactId, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_list(
        mut self,
        admin_key: Option<AdminKey>,
        request: PageRequest,
        result: Result<ContactPage, ContactListError>,
    ) -> Self {
        self.expect_list()
            .once()
            .with(
                mockall::predicate::eq(admin_key),
                mockall::predicate::eq(request),
            )
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
