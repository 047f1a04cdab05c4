use std::future::Future;

use chrono::{DateTime, Utc};
use portfolio_models::environment::Environment;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait HealthFeatureService: Send + Sync + 'static {
    /// Reports whether the service is running and the database is reachable.
    fn get_status(&self) -> impl Future<Output = HealthStatus> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub timestamp: DateTime<Utc>,
    pub environment: Environment,
    pub database: bool,
}

#[cfg(feature = "mock")]
impl MockHealthFeatureService {
    pub fn with_get_status(mut self, status: HealthStatus) -> Self {
        self.expect_get_status()
            .once()
            .return_once(|| Box::pin(std::future::ready(status)));
        self
    }
}
