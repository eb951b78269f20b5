use clap::Parser;
use tracing_subscriber::EnvFilter;

use news_agency_api::{app, cli::Cli, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SESSION_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.apply(config::config().clone());
    tracing::info!("Starting News Agency API in {:?} mode", config.environment);

    let state = AppState::from_config(&config, cli.fixtures.as_deref()).await?;

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;

    tracing::info!("News Agency API listening on http://{}", bind_addr);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
