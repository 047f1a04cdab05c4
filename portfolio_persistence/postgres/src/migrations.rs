use std::collections::HashSet;

use anyhow::Context;
use tracing::info;

use crate::{PgClient, PostgresDatabase};

/// Schema change embedded at build time from `migrations/<name>.{up,down}.sql`.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct MigrationStatus {
    pub migration: Migration,
    pub applied: bool,
}

/// All migrations, oldest first.
pub const MIGRATIONS: &[Migration] = include!(env!("MIGRATIONS"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl PostgresDatabase {
    pub async fn list_migrations(&self) -> anyhow::Result<Vec<MigrationStatus>> {
        let conn = self.connection().await?;
        status(&conn).await
    }

    /// Applies pending migrations in order, at most `limit` of them.
    pub async fn run_migrations(&self, limit: Option<usize>) -> anyhow::Result<Vec<&'static str>> {
        self.migrate(Direction::Up, limit).await
    }

    /// Reverts applied migrations, newest first, at most `limit` of them.
    pub async fn revert_migrations(
        &self,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<&'static str>> {
        self.migrate(Direction::Down, limit).await
    }

    /// Drops every table, including all stored contacts.
    pub async fn reset(&self) -> anyhow::Result<()> {
        self.connection()
            .await?
            .batch_execute("drop schema public cascade; create schema public;")
            .await
            .context("Failed to drop and recreate schema public")
    }

    async fn migrate(
        &self,
        direction: Direction,
        limit: Option<usize>,
    ) -> anyhow::Result<Vec<&'static str>> {
        let mut conn = self.connection().await?;
        let status = status(&conn).await?;

        let selected = match direction {
            Direction::Up => status.iter().filter(|s| !s.applied).collect::<Vec<_>>(),
            Direction::Down => status.iter().rev().filter(|s| s.applied).collect(),
        };
        let selected = selected.into_iter().take(limit.unwrap_or(usize::MAX));

        let mut done = Vec::new();
        for &MigrationStatus { migration, .. } in selected {
            let (script, bookkeeping) = match direction {
                Direction::Up => (
                    migration.up,
                    "insert into schema_migrations (name) values ($1)",
                ),
                Direction::Down => (
                    migration.down,
                    "delete from schema_migrations where name = $1",
                ),
            };

            let txn = conn.transaction().await?;
            txn.batch_execute(script)
                .await
                .with_context(|| format!("Migration {} failed ({direction:?})", migration.name))?;
            txn.execute(bookkeeping, &[&migration.name]).await?;
            txn.commit()
                .await
                .with_context(|| format!("Failed to commit migration {}", migration.name))?;

            info!(migration = migration.name, ?direction, "migrated");
            done.push(migration.name);
        }

        Ok(done)
    }
}

async fn status(conn: &PgClient) -> anyhow::Result<Vec<MigrationStatus>> {
    conn.batch_execute(
        "create table if not exists schema_migrations (
            name text primary key,
            applied_at timestamp with time zone not null default now()
        )",
    )
    .await
    .context("Failed to create the schema_migrations table")?;

    let applied = conn
        .query("select name from schema_migrations", &[])
        .await
        .context("Failed to read applied migrations")?
        .iter()
        .map(|row| row.get::<_, String>(0))
        .collect::<HashSet<_>>();

    Ok(MIGRATIONS
        .iter()
        .map(|&migration| MigrationStatus {
            migration,
            applied: applied.contains(migration.name),
        })
        .collect())
}
