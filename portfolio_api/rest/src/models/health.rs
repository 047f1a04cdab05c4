use chrono::{DateTime, Utc};
use portfolio_core_health_contracts::HealthStatus;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiHealthStatus {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    pub database: bool,
}

impl From<HealthStatus> for ApiHealthStatus {
    fn from(value: HealthStatus) -> Self {
        Self {
            status: "ok",
            message: "Portfolio API is running",
            timestamp: value.timestamp,
            environment: value.environment.to_string(),
            database: value.database,
        }
    }
}
