use std::future::Future;

pub mod contact;

#[cfg_attr(feature = "mock", mockall::automock(type Transaction = MockTransaction;))]
pub trait Database: Send + Sync + 'static {
    type Transaction: Transaction;

    /// Starts a new transaction which can be used to interact with the
    /// database.
    ///
    /// Changes are persisted only after explicitly invoking
    /// [`Transaction::commit()`]. A transaction which is dropped without
    /// being committed is rolled back.
    fn begin_transaction(&self) -> impl Future<Output = anyhow::Result<Self::Transaction>> + Send;

    /// Verify the connection to the database.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait Transaction: Send + Sync + 'static {
    /// Persists any changes made to the database using this transaction.
    fn commit(self) -> impl Future<Output = anyhow::Result<()>> + Send;
    /// Explicitly discards any changes made to the database using this
    /// transaction.
    fn rollback(self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockDatabase {
    /// Expects exactly one transaction, which is committed if
    /// `expect_commit` is set.
    pub fn build(expect_commit: bool) -> Self {
        Self::build_many(1, expect_commit)
    }

    /// Expects `count` independent transactions.
    pub fn build_many(count: usize, expect_commit: bool) -> Self {
        let mut db = Self::new();
        db.expect_begin_transaction().times(count).returning(move || {
            let mut txn = MockTransaction::new();
            if expect_commit {
                txn.expect_commit()
                    .once()
                    .return_once(|| Box::pin(std::future::ready(Ok(()))));
            }
            Box::pin(std::future::ready(Ok(txn)))
        });
        db
    }

    /// Fails every attempt to begin a transaction, as if the database were
    /// unreachable.
    pub fn unavailable() -> Self {
        let mut db = Self::new();
        db.expect_begin_transaction().returning(|| {
            Box::pin(std::future::ready(Err(anyhow::anyhow!(
                "database is not available"
            ))))
        });
        db
    }

    pub fn with_ping(mut self, result: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(if result {
                Ok(())
            } else {
                Err(anyhow::anyhow!("ping failed"))
            }))
        });
        self
    }
}
