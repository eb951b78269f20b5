use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;

/// Command-line overrides for the server binary. Anything not given here
/// falls back to the environment.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "news-agency-api")]
#[command(about = "Authenticated news story API")]
#[command(version)]
pub struct Cli {
    #[arg(long, help = "Address to bind (overrides NEWS_API_HOST)")]
    pub host: Option<String>,

    #[arg(long, short, help = "Port to listen on (overrides NEWS_API_PORT / PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "YAML file of authors and stories to seed the in-memory store")]
    pub fixtures: Option<PathBuf>,

    #[arg(long, help = "Postgres URL (overrides DATABASE_URL)")]
    pub database_url: Option<String>,
}

impl Cli {
    /// Fold the flags into a loaded configuration
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
        config
    }
}
