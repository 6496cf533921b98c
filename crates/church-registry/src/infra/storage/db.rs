//! Database bootstrap: DSN-based connect for SQLite and Postgres.

use std::str::FromStr;

use anyhow::Context;
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, SqlxSqliteConnector};
use sea_orm_migration::MigratorTrait;

use crate::infra::storage::migrations::Migrator;

fn is_memory_dsn(dsn: &str) -> bool {
    dsn.contains(":memory:") || dsn.contains("mode=memory")
}

/// Connects to the database named by `dsn`.
///
/// SQLite connections enforce foreign keys and create missing database
/// files; in-memory databases are pinned to a single pooled connection so
/// every caller sees the same schema.
pub async fn connect(dsn: &str) -> anyhow::Result<DatabaseConnection> {
    if dsn.starts_with("sqlite:") {
        let options = SqliteConnectOptions::from_str(dsn)
            .with_context(|| format!("invalid sqlite DSN: {dsn}"))?
            .create_if_missing(true)
            .foreign_keys(true);
        let mut pool_options = SqlitePoolOptions::new();
        if is_memory_dsn(dsn) {
            pool_options = pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_options
            .connect_with(options)
            .await
            .context("failed to open sqlite database")?;
        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    } else {
        let mut options = ConnectOptions::new(dsn.to_owned());
        options.sqlx_logging(false);
        Database::connect(options)
            .await
            .with_context(|| format!("failed to connect to database: {dsn}"))
    }
}

/// Applies all pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    Migrator::up(db, None)
        .await
        .context("database migration failed")?;
    Ok(())
}
