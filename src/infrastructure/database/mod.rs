pub mod entities;
pub mod migrator;
pub mod repositories;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use serde::{Deserialize, Serialize};
use tracing::info;

use self::migrator::Migrator;

const MEMORY_CONNECTION_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./civic-issues.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    /// Log every SQL statement
    pub log_statements: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./civic-issues.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 8,
            log_statements: false,
        }
    }
}

impl DatabaseConfig {
    /// Private in-memory SQLite database. A single pooled connection keeps
    /// the data alive for the lifetime of the pool.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            ..Self::default()
        }
    }

    fn connect_options(&self) -> ConnectOptions {
        let mut opts = ConnectOptions::new(self.url.clone());
        opts.max_connections(self.max_connections.max(1))
            .min_connections(self.min_connections.min(self.max_connections.max(1)))
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .sqlx_logging(self.log_statements);
        if self.url.contains(":memory:") {
            // Dropping the last connection would drop the data with it.
            opts.idle_timeout(MEMORY_CONNECTION_LIFETIME)
                .max_lifetime(MEMORY_CONNECTION_LIFETIME);
        }
        opts
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let db = Database::connect(config.connect_options()).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Apply all pending migrations.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), sea_orm::DbErr> {
    info!("Running database migrations...");
    Migrator::up(db, None).await?;
    info!("Migrations completed");
    Ok(())
}

/// Connect to a fresh in-memory database with the schema applied.
pub async fn connect_in_memory() -> Result<DatabaseConnection, sea_orm::DbErr> {
    let db = init_database(&DatabaseConfig::in_memory()).await?;
    run_migrations(&db).await?;
    Ok(db)
}
