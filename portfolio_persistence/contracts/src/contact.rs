use std::future::Future;

use portfolio_models::{contact::ContactRecord, pagination::PaginationSlice};

/// Persistent storage of contact form submissions.
///
/// Records are append-only: there is no way to update or delete one.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactRepository<Txn: Send + Sync + 'static>: Send + Sync + 'static {
    /// Returns the total number of stored contact records.
    fn count(&self, txn: &mut Txn) -> impl Future<Output = anyhow::Result<u64>> + Send;

    /// Returns the contact records within the given pagination slice, newest
    /// first.
    fn list(
        &self,
        txn: &mut Txn,
        pagination: PaginationSlice,
    ) -> impl Future<Output = anyhow::Result<Vec<ContactRecord>>> + Send;

    /// Stores a new contact record.
    fn create(
        &self,
        txn: &mut Txn,
        record: &ContactRecord,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl<Txn: Send + Sync + 'static> MockContactRepository<Txn> {
    pub fn with_count(mut self, result: u64) -> Self {
        self.expect_count()
            .once()
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_list(mut self, pagination: PaginationSlice, result: Vec<ContactRecord>) -> Self {
        self.expect_list()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(pagination),
            )
            .return_once(|_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_list_error(mut self, pagination: PaginationSlice) -> Self {
        self.expect_list()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(pagination),
            )
            .return_once(|_, _| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!("query failed"))))
            });
        self
    }

    pub fn with_create(mut self, record: ContactRecord, result: bool) -> Self {
        self.expect_create()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(record),
            )
            .return_once(move |_, _| {
                Box::pin(std::future::ready(if result {
                    Ok(())
                } else {
                    Err(anyhow::anyhow!("insert failed"))
                }))
            });
        self
    }
}
