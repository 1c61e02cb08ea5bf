// src/main.rs
use stowage::api;
use stowage::config::AppConfig;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // .env may set RUST_LOG, so it is loaded before the subscriber.
    let dotenv_result = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("stowage=info,tower_http=info")),
        )
        .init();

    if let Err(err) = dotenv_result {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            warn!("Could not load .env: {}", err);
        }
    }

    let app_config = AppConfig::from_env();
    info!(
        blocking_order = ?app_config.planner.blocking_order,
        enforce_container_bounds = app_config.planner.enforce_container_bounds,
        "Stowage service starting"
    );

    if let Err(err) = api::start_api_server(app_config.api, app_config.planner).await {
        error!("API server terminated with an error: {}", err);
        std::process::exit(1);
    }
}
