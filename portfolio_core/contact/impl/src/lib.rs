use portfolio_auth_contracts::AdminAuthService;
use portfolio_core_contact_contracts::{
    ContactFeatureService, ContactListError, ContactPage, ContactSubmitError,
};
use portfolio_di::Build;
use portfolio_models::{
    auth::AdminKey,
    contact::{ContactId, ContactRecord, ContactSubmission},
    pagination::{PageMeta, PageRequest},
};
use portfolio_persistence_contracts::{contact::ContactRepository, Database, Transaction};
use portfolio_shared_contracts::{id::IdService, time::TimeService};
use portfolio_utils::trace_instrument;
use tracing::{debug, info};

pub use validate::{validate_submission, ValidContact};

mod validate;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Db, AdminAuth, Id, Time, ContactRepo> {
    db: Db,
    admin_auth: AdminAuth,
    id: Id,
    time: Time,
    contact_repo: ContactRepo,
}

impl<Db, AdminAuth, Id, Time, ContactRepo> ContactFeatureService
    for ContactFeatureServiceImpl<Db, AdminAuth, Id, Time, ContactRepo>
where
    Db: Database,
    AdminAuth: AdminAuthService,
    Id: IdService,
    Time: TimeService,
    ContactRepo: ContactRepository<Db::Transaction>,
{
    #[trace_instrument(skip(self))]
    async fn submit(&self, submission: ContactSubmission) -> Result<ContactId, ContactSubmitError> {
        let ValidContact {
            name,
            email,
            phone,
            message,
        } = validate_submission(submission)
            .inspect_err(|err| debug!("rejecting contact submission: {err}"))?;

        let record = ContactRecord {
            id: self.id.generate(),
            name,
            email,
            phone,
            message,
            created_at: self.time.now(),
        };

        let mut txn = self.db.begin_transaction().await?;
        self.contact_repo.create(&mut txn, &record).await?;
        txn.commit().await?;

        info!(contact_id = %record.id, "stored new contact");

        Ok(record.id)
    }

    #[trace_instrument(skip(self))]
    async fn list(
        &self,
        admin_key: Option<AdminKey>,
        request: PageRequest,
    ) -> Result<ContactPage, ContactListError> {
        self.admin_auth.authenticate_admin(admin_key)?;

        let count = async {
            let mut txn = self.db.begin_transaction().await?;
            self.contact_repo.count(&mut txn).await
        };
        let page = async {
            let mut txn = self.db.begin_transaction().await?;
            self.contact_repo.list(&mut txn, request.slice()).await
        };
        let (total, records) = futures::try_join!(count, page)?;

        Ok(ContactPage {
            records,
            meta: PageMeta::new(request, total),
        })
    }
}
