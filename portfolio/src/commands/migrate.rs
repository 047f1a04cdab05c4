use clap::Subcommand;
use portfolio_config::Config;
use portfolio_persistence_contracts::{Database, Transaction};
use portfolio_persistence_postgres::{
    contact::PostgresContactRepository, MigrationStatus, PostgresDatabase,
};

use crate::database;

#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Show which migrations have been applied
    #[command(aliases(["status", "s", "l"]))]
    List,
    /// Apply pending migrations
    #[command(aliases(["u"]))]
    Up {
        /// Stop after `n` migrations
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Revert applied migrations, newest first
    #[command(aliases(["d"]))]
    Down {
        /// Number of migrations to revert
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
        #[arg(long, required = true)]
        force: bool,
    },
    /// Drop all tables including every stored contact
    Reset {
        #[arg(long, required = true)]
        force: bool,
    },
    /// Recreate the schema and insert the demo contacts
    Demo {
        #[arg(long, required = true)]
        force: bool,
    },
}

impl MigrateCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let db = database::connect(&config.database).await?;
        let result = match self {
            Self::List => list(&db).await,
            Self::Up { count } => print_applied(&db.run_migrations(count).await?, "applied"),
            Self::Down { count, force: _ } => {
                print_applied(&db.revert_migrations(Some(count)).await?, "reverted")
            }
            Self::Reset { force: _ } => reset(&db).await,
            Self::Demo { force: _ } => demo(&db).await,
        };
        db.close();
        result
    }
}

async fn list(db: &PostgresDatabase) -> anyhow::Result<()> {
    for MigrationStatus { migration, applied } in db.list_migrations().await? {
        let status = if applied { "applied" } else { "pending" };
        println!("[{status}] {}", migration.name);
    }
    Ok(())
}

async fn reset(db: &PostgresDatabase) -> anyhow::Result<()> {
    db.reset().await?;
    println!("Database has been reset");
    Ok(())
}

async fn demo(db: &PostgresDatabase) -> anyhow::Result<()> {
    reset(db).await?;
    print_applied(&db.run_migrations(None).await?, "applied")?;

    let mut txn = db.begin_transaction().await?;
    portfolio_demo::create(&mut txn, PostgresContactRepository).await?;
    txn.commit().await?;
    println!(
        "Inserted {} demo contacts",
        portfolio_demo::contact::ALL_CONTACTS.len()
    );

    Ok(())
}

fn print_applied(names: &[&str], action: &str) -> anyhow::Result<()> {
    if names.is_empty() {
        println!("No migrations have been {action}.");
    }
    for name in names {
        println!("[{action}] {name}");
    }
    Ok(())
}
