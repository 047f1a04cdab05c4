
use portfolio_api_rest::{CorsPolicy, RestServerConfig};
use portfolio_auth_impl::AdminAuthServiceConfig;
use portfolio_config::Config;
use portfolio_core_health_impl::HealthFeatureConfig;
use portfolio_di::provider;
use portfolio_models::auth::AdminKey;
use types::Database;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        database: Database,
        ..config: ConfigProvider {
            RestServerConfig,
            AdminAuthServiceConfig,
            HealthFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider, database: Database) -> Self {
        Self {
            _cache: Default::default(),
            database,
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        rest_server_config: RestServerConfig,
        admin_auth_service_config: AdminAuthServiceConfig,
        health_feature_config: HealthFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> Self {
        let mut origins = config.cors.frontend_urls.clone();
        for origin in &config.cors.dev_origins {
            if !origins.contains(origin) {
                origins.push(origin.clone());
            }
        }

        let rest_server_config = RestServerConfig {
            environment: config.environment.clone(),
            api_version: config.http.api_version.as_str().into(),
            cors: CorsPolicy {
                origins,
                preview_suffix: config.cors.preview_suffix.clone(),
            }
            .into(),
        };

        let admin_auth_service_config = AdminAuthServiceConfig {
            secret: config
                .admin
                .secret
                .as_deref()
                .filter(|secret| !secret.is_empty())
                .map(|secret| AdminKey::from(secret).into()),
        };

        let health_feature_config = HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
            environment: config.environment.clone(),
        };

        Self {
            _cache: Default::default(),
            rest_server_config,
            admin_auth_service_config,
            health_feature_config,
        }
    }
}
