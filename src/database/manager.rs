use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use super::StoreError;
use crate::config::DatabaseConfig;

/// Builds the Postgres connection pool used by `PgDataStore`
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect using the configured URL, pool size and acquire timeout
    pub async fn connect(database_url: &str, config: &DatabaseConfig) -> Result<PgPool, StoreError> {
        let display_url = Self::redacted_url(database_url)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(database_url)
            .await?;

        info!("Created database pool for: {}", display_url);
        Ok(pool)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Connection URL with the password masked, safe for logs
    pub fn redacted_url(database_url: &str) -> Result<String, StoreError> {
        let mut url = url::Url::parse(database_url).map_err(|_| StoreError::InvalidDatabaseUrl)?;
        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(StoreError::InvalidDatabaseUrl);
        }
        if url.password().is_some() {
            url.set_password(Some("****")).map_err(|_| StoreError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}
