use portfolio_auth_contracts::MockAdminAuthService;
use portfolio_persistence_contracts::{contact::MockContactRepository, MockDatabase, MockTransaction};
use portfolio_shared_contracts::{id::MockIdService, time::MockTimeService};

use crate::ContactFeatureServiceImpl;


type Sut = ContactFeatureServiceImpl<
    MockDatabase,
    MockAdminAuthService,
    MockIdService,
    MockTimeService,
    MockContactRepository<MockTransaction>,
>;

impl Default for Sut {
    fn default() -> Self {
        Self {
            db: MockDatabase::new(),
            admin_auth: MockAdminAuthService::new(),
            id: MockIdService::new(),
            time: MockTimeService::new(),
            contact_repo: MockContactRepository::new(),
        }
    }
}
