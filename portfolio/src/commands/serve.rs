use portfolio_config::Config;
use portfolio_di::Provide;
use portfolio_utils::portfolio_version;
use tracing::{info, warn};

use crate::{
    database::{self, ServerDatabase},
    environment::{types::RestServer, ConfigProvider, Provider},
};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to database");
    let ServerDatabase {
        database,
        reachable,
    } = database::connect_server(&config.database, &config.environment).await?;

    if reachable {
        info!("Applying pending migrations");
        let applied = database.run_migrations(None).await?;
        for name in &applied {
            info!("Applied {name}");
        }
        if applied.is_empty() {
            info!("No migrations pending");
        }
    } else {
        warn!("Database is not reachable, skipping migrations");
    }

    let server: RestServer = {
        let config_provider = ConfigProvider::new(&config);
        Provider::new(config_provider, database.clone()).provide()
    };

    info!(
        version = portfolio_version(),
        environment = %config.environment,
        "Starting http server on {}:{}",
        config.http.host,
        config.http.port,
    );
    info!(
        "Health check available at http://{}:{}/api/{}/health",
        config.http.host, config.http.port, config.http.api_version
    );

    let result = server
        .serve(config.http.host, config.http.port, shutdown_signal())
        .await;

    database.close();

    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl+c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, waiting for pending requests");
}
