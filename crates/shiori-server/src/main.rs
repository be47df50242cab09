use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use shiori_api::jikan::JikanClient;
use shiori_core::config::AppConfig;
use shiori_server::telemetry::init_tracing;
use shiori_server::{build_router, AppState};

#[derive(Parser)]
#[command(name = "shiori", about = "Browse an anime catalog and keep a watch list")]
struct Cli {
    /// Config file to load instead of the per-user one.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address, overriding `server.bind`.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }

    let _guard = init_tracing(&config.logging);

    let catalog = JikanClient::new(
        &config.catalog.base_url,
        Duration::from_secs(config.catalog.timeout_secs),
    )?;
    tracing::info!(base_url = %catalog.base_url(), "catalog gateway ready");

    let state = AppState::new(catalog, &config);
    let app = build_router(state);

    let listener = TcpListener::bind(&config.server.bind).await?;
    tracing::info!("shiori listening on {}", config.server.bind);

    axum::serve(listener, app).await?;
    Ok(())
}
