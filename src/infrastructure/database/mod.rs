pub mod entities;
pub mod migrator;
pub mod page_source;
pub mod repositories;
pub mod seed;

pub use page_source::SelectPageSource;
pub use seed::seed_if_empty;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::shared::errors::{DomainError, InfraError};

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./contoso.db?mode=rwc")
    pub url: String,
    /// Upper bound on pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./contoso.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

impl DatabaseConfig {
    /// Private in-memory SQLite database.
    ///
    /// Every pooled connection to `sqlite::memory:` opens its own empty
    /// database, so the pool is pinned to a single connection.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    info!("Connecting to database: {}", config.url);

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Map a driver error onto the domain's storage error.
pub(crate) fn db_err(e: DbErr) -> DomainError {
    InfraError::Database(e).into()
}

#[cfg(test)]
pub(crate) mod testing {
    use sea_orm::DatabaseConnection;
    use sea_orm_migration::MigratorTrait;

    use super::migrator::Migrator;
    use super::{init_database, seed_if_empty, DatabaseConfig};

    /// Fresh in-memory database with the schema applied.
    pub async fn empty_database() -> DatabaseConnection {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        db
    }

    /// Fresh in-memory database holding the sample school.
    pub async fn seeded_database() -> DatabaseConnection {
        let db = empty_database().await;
        assert!(seed_if_empty(&db).await.unwrap());
        db
    }
}
