use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{File, FileFormat};
use portfolio_models::environment::Environment;
use serde::Deserialize;

pub use duration::Duration;

mod duration;

/// Defaults shipped with the binary, loaded before any other source.
pub const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

/// Colon separated list of additional config files.
pub const CONFIG_PATHS_ENV: &str = "PORTFOLIO_CONFIG";

/// Environment variables which override a single config key.
pub const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("HOST", "http.host"),
    ("PORT", "http.port"),
    ("API_VERSION", "http.api_version"),
    ("NODE_ENV", "environment"),
    ("CORS_PREVIEW_SUFFIX", "cors.preview_suffix"),
    ("DATABASE_URL", "database.url"),
    ("ADMIN_SECRET", "admin.secret"),
];

/// Comma separated list of allowed frontend origins.
pub const FRONTEND_URL_ENV: &str = "FRONTEND_URL";

/// Loads the config from the default config, the files listed in
/// `PORTFOLIO_CONFIG` and the process environment.
pub fn load() -> anyhow::Result<Config> {
    let paths = std::env::var(CONFIG_PATHS_ENV).unwrap_or_default();
    let paths = paths
        .split(':')
        .filter(|path| !path.is_empty())
        .collect::<Vec<_>>();

    load_with(&paths, |key| std::env::var(key).ok())
}

pub fn load_with(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = config::Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    let builder = paths.iter().try_fold(builder, |builder, path| {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        let source = File::from_str(&content, FileFormat::Toml);
        anyhow::Ok(builder.add_source(source))
    })?;

    let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());

    let builder = ENV_OVERRIDES
        .iter()
        .try_fold(builder, |builder, &(var, key)| {
            builder.set_override_option(key, env(var))
        })?
        .set_override_option(
            "cors.frontend_urls",
            env(FRONTEND_URL_ENV).map(|urls| {
                urls.split(',')
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            }),
        )?;

    builder
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub http: HttpConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    pub api_version: String,
}

#[derive(Debug, Deserialize)]
pub struct CorsConfig {
    pub frontend_urls: Vec<String>,
    pub dev_origins: Vec<String>,
    pub preview_suffix: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub connect_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

#[derive(Deserialize)]
pub struct AdminConfig {
    pub secret: Option<String>,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}
