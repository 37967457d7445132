use std::time::Duration;

use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::prelude::MigratorTrait;

use crate::migration::Migrator;

pub type OrmConn = DatabaseConnection;

/// Create a SeaORM connection.
///
/// In-memory SQLite databases live and die with a single connection, so the
/// pool is pinned to one connection for those URLs.
pub async fn create_orm_conn(database_url: &str) -> Result<OrmConn> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    if is_in_memory(database_url) {
        options.max_connections(1).min_connections(1);
    } else {
        options.max_connections(10);
    }
    options.connect_timeout(Duration::from_secs(8));

    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Apply every pending schema migration.
pub async fn run_migrations(conn: &OrmConn) -> Result<()> {
    Migrator::up(conn, None).await?;
    Ok(())
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.starts_with("sqlite:") && database_url.contains("memory")
}
