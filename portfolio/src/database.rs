use anyhow::Context;
use portfolio_config::DatabaseConfig;
use portfolio_models::environment::Environment;
use portfolio_persistence_postgres::{PostgresDatabase, PostgresDatabaseConfig};
use tracing::warn;

/// Database handle for the api server.
pub struct ServerDatabase {
    pub database: PostgresDatabase,
    /// Whether a connection could be established during startup.
    pub reachable: bool,
}

/// Connects to the database for an operator command, which always needs a
/// working connection.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<PostgresDatabase> {
    let url = config
        .url
        .clone()
        .context("No database url has been configured (set DATABASE_URL)")?;

    PostgresDatabase::connect(&pool_config(config, url))
        .await
        .context("Failed to connect to database")
}

/// Connects to the database for the api server.
///
/// In production a missing url or an unreachable database is fatal. In any
/// other environment the server starts anyway: without a url every database
/// access fails, and with an unreachable database connections are retried
/// on demand.
pub async fn connect_server(
    config: &DatabaseConfig,
    environment: &Environment,
) -> anyhow::Result<ServerDatabase> {
    let Some(url) = config.url.clone() else {
        if environment.is_production() {
            anyhow::bail!("No database url has been configured (set DATABASE_URL)");
        }
        warn!("No database url has been configured, contacts can neither be stored nor listed");
        return Ok(ServerDatabase {
            database: PostgresDatabase::disconnected(),
            reachable: false,
        });
    };

    let pool_config = pool_config(config, url);
    match PostgresDatabase::connect(&pool_config).await {
        Ok(database) => Ok(ServerDatabase {
            database,
            reachable: true,
        }),
        Err(err) if !environment.is_production() => {
            warn!("Failed to connect to database, continuing without it: {err:#}");
            Ok(ServerDatabase {
                database: PostgresDatabase::connect_lazy(&pool_config)?,
                reachable: false,
            })
        }
        Err(err) => Err(err.context("Failed to connect to database")),
    }
}

fn pool_config(config: &DatabaseConfig, url: String) -> PostgresDatabaseConfig {
    PostgresDatabaseConfig {
        url,
        max_connections: config.max_connections,
        min_connections: config.min_connections,
        acquire_timeout: config.acquire_timeout.into(),
        connect_timeout: config.connect_timeout.into(),
        idle_timeout: config.idle_timeout.map(Into::into),
        max_lifetime: config.max_lifetime.map(Into::into),
    }
}
