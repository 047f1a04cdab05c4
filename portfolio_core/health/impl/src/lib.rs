use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use portfolio_core_health_contracts::{HealthFeatureService, HealthStatus};
use portfolio_di::Build;
use portfolio_models::environment::Environment;
use portfolio_persistence_contracts::Database;
use portfolio_shared_contracts::time::TimeService;
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone, Build)]
pub struct HealthFeatureServiceImpl<Time, Db> {
    time: Time,
    db: Db,
    config: HealthFeatureConfig,
    #[state]
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
    pub environment: Environment,
}

#[derive(Debug, Default)]
struct State {
    database: RwLock<Option<CachedPing>>,
}

#[derive(Debug, Clone, Copy)]
struct CachedPing {
    reachable: bool,
    timestamp: DateTime<Utc>,
}

impl<Time, Db> HealthFeatureServiceImpl<Time, Db>
where
    Time: TimeService,
    Db: Database,
{
    async fn database_reachable(&self, now: DateTime<Utc>) -> bool {
        let is_fresh = |c: &&CachedPing| now < c.timestamp + self.config.cache_ttl;

        if let Some(cached) = self.state.database.read().await.as_ref().filter(is_fresh) {
            return cached.reachable;
        }

        let mut cache_guard = self.state.database.write().await;
        if let Some(cached) = cache_guard.as_ref().filter(is_fresh) {
            return cached.reachable;
        }

        let reachable = self
            .db
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping database: {err:#}"))
            .is_ok();

        cache_guard
            .insert(CachedPing {
                reachable,
                timestamp: now,
            })
            .reachable
    }
}

impl<Time, Db> HealthFeatureService for HealthFeatureServiceImpl<Time, Db>
where
    Time: TimeService,
    Db: Database,
{
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let database = self.database_reachable(now).await;

        HealthStatus {
            timestamp: now,
            environment: self.config.environment.clone(),
            database,
        }
    }
}
