use std::{
    future::Future,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::Router;
use portfolio_core_contact_contracts::ContactFeatureService;
use portfolio_core_health_contracts::HealthFeatureService;
use portfolio_di::Build;
use portfolio_models::environment::Environment;
use tokio::net::TcpListener;
use tracing::info;

pub use middlewares::cors::CorsPolicy;

mod errors;
mod extractors;
mod middlewares;
mod models;
mod routes;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub environment: Environment,
    /// Version segment of the route prefix, e.g. `v1` for `/api/v1`.
    pub api_version: Arc<str>,
    pub cors: Arc<CorsPolicy>,
}

impl RestServerConfig {
    pub fn base_path(&self) -> String {
        format!("/api/{}", self.api_version)
    }
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    /// Serves the api until `shutdown` completes. Requests which are in
    /// flight at that point are allowed to finish.
    pub async fn serve(
        self,
        host: IpAddr,
        port: u16,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        let api = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into()));

        let router = Router::new()
            .nest(&self.config.base_path(), api)
            .fallback(routes::not_found);

        let router = middlewares::cors::add(self.config.cors)(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::client_ip::add(router);
        let router = middlewares::request_id::add(router);
        middlewares::panic_handler::add(self.config.environment)(router)
    }
}
