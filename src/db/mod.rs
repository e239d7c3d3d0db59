pub mod memory;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use log::{info, warn};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::{Config, DatabaseConfig};
pub use memory::MemoryEmployeeStore;
pub use postgres::PgEmployeeStore;
pub use store::EmployeeStore;

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Builds the store selected by `config`, connecting and migrating when a database is set.
pub async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn EmployeeStore>> {
    match &config.database {
        Some(database) => {
            let pool = create_pool(database).await?;
            if database.run_migrations {
                run_migrations(&pool).await?;
                info!("database migrations applied");
            }
            Ok(Arc::new(PgEmployeeStore::new(pool)))
        }
        None => {
            warn!("DATABASE_URL not set, records are kept in memory and lost on exit");
            Ok(Arc::new(MemoryEmployeeStore::new()))
        }
    }
}
