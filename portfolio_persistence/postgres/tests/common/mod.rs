use portfolio_persistence_contracts::{Database, Transaction};
use portfolio_persistence_postgres::{
    contact::PostgresContactRepository, PostgresDatabase, PostgresDatabaseConfig,
};

pub type Db = PostgresDatabase;

pub async fn setup() -> Db {
    let db = setup_clean().await;

    db.run_migrations(None).await.unwrap();

    let mut txn = db.begin_transaction().await.unwrap();
    portfolio_demo::create(&mut txn, PostgresContactRepository)
        .await
        .unwrap();
    txn.commit().await.unwrap();

    db
}

pub async fn setup_clean() -> Db {
    let config = portfolio_config::load().unwrap();
    let database = config.database;

    let db = Db::connect(&PostgresDatabaseConfig {
        url: database
            .url
            .expect("database.url must be configured to run the database tests"),
        max_connections: database.max_connections,
        min_connections: database.min_connections,
        acquire_timeout: database.acquire_timeout.into(),
        connect_timeout: database.connect_timeout.into(),
        idle_timeout: database.idle_timeout.map(Into::into),
        max_lifetime: database.max_lifetime.map(Into::into),
    })
    .await
    .unwrap();

    db.reset().await.unwrap();
    db
}
