use std::time::Duration;

use anyhow::{anyhow, Context};
use bb8::{Pool, PooledConnection};
use bb8_postgres::{
    tokio_postgres::{self, NoTls},
    PostgresConnectionManager,
};
use ouroboros::self_referencing;
use portfolio_persistence_contracts::{Database, Transaction};
use portfolio_utils::trace_instrument;
use tracing::{info, trace};

pub use migrations::{Migration, MigrationStatus, MIGRATIONS};

pub mod contact;
mod migrations;

type PgClient = tokio_postgres::Client;
type PgPool = Pool<PostgresConnectionManager<NoTls>>;
type PgPooledConnection = PooledConnection<'static, PostgresConnectionManager<NoTls>>;
type PgTransaction<'a> = tokio_postgres::Transaction<'a>;

/// Handle to the connection pool.
///
/// A database without a pool is used when no connection url has been
/// configured: the process keeps running, but every attempt to access the
/// database fails.
#[derive(Debug, Clone)]
pub struct PostgresDatabase {
    pool: Option<PgPool>,
}

#[derive(Debug)]
pub struct PostgresDatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub connect_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl PostgresDatabase {
    /// Creates the connection pool and waits until the minimum number of
    /// connections has been established.
    pub async fn connect(config: &PostgresDatabaseConfig) -> anyhow::Result<Self> {
        let pool = pool_builder(config)
            .build(connection_manager(config)?)
            .await?;

        Ok(Self { pool: Some(pool) })
    }

    /// Creates the connection pool without connecting. Connections are
    /// established on first use.
    pub fn connect_lazy(config: &PostgresDatabaseConfig) -> anyhow::Result<Self> {
        let pool = pool_builder(config).build_unchecked(connection_manager(config)?);

        Ok(Self { pool: Some(pool) })
    }

    pub fn disconnected() -> Self {
        Self { pool: None }
    }

    pub fn is_connected(&self) -> bool {
        self.pool.is_some()
    }

    /// Releases the handle to the connection pool. Pooled connections are
    /// closed once the last clone of the handle is gone.
    pub fn close(self) {
        if self.pool.is_some() {
            info!("Closing database connection pool");
        }
        drop(self);
    }

    fn pool(&self) -> anyhow::Result<&PgPool> {
        self.pool
            .as_ref()
            .ok_or_else(|| anyhow!("No database connection has been configured"))
    }

    pub(crate) async fn connection(
        &self,
    ) -> anyhow::Result<PooledConnection<'_, PostgresConnectionManager<NoTls>>> {
        self.pool()?
            .get()
            .await
            .context("Failed to acquire database connection")
    }
}

impl Database for PostgresDatabase {
    type Transaction = PostgresTransaction;

    async fn begin_transaction(&self) -> anyhow::Result<Self::Transaction> {
        trace!("begin transaction");

        let conn = self
            .pool()?
            .get_owned()
            .await
            .context("Failed to acquire database connection")?;

        PostgresTransactionAsyncSendTryBuilder {
            conn,
            txn_builder: |conn| Box::pin(async move { conn.transaction().await.map(Some) }),
        }
        .try_build()
        .await
        .context("Failed to begin transaction")
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        let conn = self.connection().await?;

        conn.query_one("select 1", &[])
            .await
            .map_err(Into::into)
            .map(|row| row.get(0))
            .and_then(|res: i32| {
                (res == 1)
                    .then_some(())
                    .ok_or_else(|| anyhow!("Expected a result of 1, got {res} instead"))
            })
            .context("Failed to ping database")
    }
}

#[self_referencing]
pub struct PostgresTransaction {
    conn: PgPooledConnection,
    #[borrows(mut conn)]
    #[covariant]
    txn: Option<PgTransaction<'this>>,
}

impl PostgresTransaction {
    fn txn(&self) -> anyhow::Result<&PgTransaction<'_>> {
        self.borrow_txn()
            .as_ref()
            .ok_or_else(|| anyhow!("Transaction has already been finished"))
    }
}

impl Transaction for PostgresTransaction {
    async fn commit(mut self) -> anyhow::Result<()> {
        trace!("commit transaction");

        self.with_txn_mut(|txn| txn.take())
            .ok_or_else(|| anyhow!("Transaction has already been finished"))?
            .commit()
            .await
            .context("Failed to commit transaction")
    }

    async fn rollback(mut self) -> anyhow::Result<()> {
        trace!("rollback transaction");

        self.with_txn_mut(|txn| txn.take())
            .ok_or_else(|| anyhow!("Transaction has already been finished"))?
            .rollback()
            .await
            .context("Failed to rollback transaction")
    }
}

fn connection_manager(
    config: &PostgresDatabaseConfig,
) -> anyhow::Result<PostgresConnectionManager<NoTls>> {
    let mut pg_config = config
        .url
        .parse::<tokio_postgres::Config>()
        .context("Failed to parse database url")?;
    pg_config.connect_timeout(config.connect_timeout);
    Ok(PostgresConnectionManager::new(pg_config, NoTls))
}

fn pool_builder(config: &PostgresDatabaseConfig) -> bb8::Builder<PostgresConnectionManager<NoTls>> {
    Pool::builder()
        .max_size(config.max_connections)
        .min_idle(config.min_connections)
        .connection_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .max_lifetime(config.max_lifetime)
}

macro_rules! columns {
    ($vis:vis $ident:ident as $alias:literal: $fst:literal $(, $col:literal)* $(,)?) => {
        ::paste::paste! {
            $vis const [< $ident:snake:upper _CNT >]: usize = [ $fst $(, $col)* ].len();
            $vis const [< $ident:snake:upper _COLS >]: &str = ::core::concat!( '"', $alias, "\".\"", $fst, '"' $(, ", \"" , $alias, "\".\"", $col, '"' )* );
            $vis const [< $ident:snake:upper _COL_NAMES >]: &str = ::core::concat!( '"', $fst, '"' $(, ", \"", $col, '"' )* );
        }
    };
}
use columns;

/// `$1, $2, ...` placeholders for the given parameter indices.
fn arg_indices(indices: impl IntoIterator<Item = usize>) -> String {
    indices
        .into_iter()
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ")
}
