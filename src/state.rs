use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::{info, warn};

use crate::auth::{AuthService, SessionAuthService};
use crate::config::{AppConfig, SecurityConfig};
use crate::database::{DataStore, DatabaseManager, MemoryStore, PgDataStore};
use crate::fixture::load_fixtures;
use crate::services::NewsService;

/// Shared handles for every request
#[derive(Clone)]
pub struct AppState {
    pub news: NewsService,
    pub auth: Arc<dyn AuthService>,
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn DataStore>, security: SecurityConfig) -> Self {
        let auth: Arc<dyn AuthService> = Arc::new(SessionAuthService::from_config(store.clone(), &security));
        let news = NewsService::new(store, auth.clone());
        Self { news, auth, security }
    }

    /// Postgres when a database URL is configured, otherwise an in-memory
    /// store optionally seeded from a fixture file.
    pub async fn from_config(config: &AppConfig, fixtures: Option<&Path>) -> anyhow::Result<Self> {
        let store: Arc<dyn DataStore> = match &config.database.url {
            Some(url) => {
                if fixtures.is_some() {
                    bail!("fixtures can only seed the in-memory store; unset DATABASE_URL to use them");
                }
                let pool = DatabaseManager::connect(url, &config.database)
                    .await
                    .context("failed to connect to Postgres")?;
                info!("Using Postgres store at {}", DatabaseManager::redacted_url(url)?);
                Arc::new(PgDataStore::new(pool))
            }
            None => {
                let store = MemoryStore::new();
                if let Some(path) = fixtures {
                    load_fixtures(path)
                        .with_context(|| format!("failed to load fixtures from {}", path.display()))?
                        .apply(&store)
                        .await
                        .context("failed to apply fixtures")?;
                }
                info!("Using in-memory store");
                Arc::new(store)
            }
        };

        if config.security.session_secret.is_empty() {
            warn!("SESSION_SECRET is not set; every login will fail until it is");
        }

        Ok(Self::new(store, config.security.clone()))
    }
}
