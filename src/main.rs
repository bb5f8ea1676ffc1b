// Entry point for the ad generation backend

use adforge::{create_router, AppState, Config};

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Arc::new(Config::new()?);

    // Initialize logging
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new(format!(
        "adforge={}",
        match config.server.log_level {
            tracing::Level::TRACE => "trace",
            tracing::Level::DEBUG => "debug",
            tracing::Level::INFO => "info",
            tracing::Level::WARN => "warn",
            tracing::Level::ERROR => "error",
        }
    ));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("=== ANIMAL FEED AD GENERATOR ===");
    info!(
        "Providers: text={} image={}",
        config.provider.text_endpoint, config.provider.image_endpoint
    );

    let state = AppState::from_config(Arc::clone(&config))?;
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("{}", "=".repeat(70));
    info!("Server starting on http://{}", addr);
    info!("{}", "-".repeat(70));
    info!("Endpoints:");
    info!("  GET  /               - Root endpoint");
    info!("  GET  /health         - Health check");
    info!("  POST /generate-ad    - Generate ad copy (JSON)");
    info!("  POST /generate-image - Compose ad creative (JSON)");
    info!("{}", "=".repeat(70));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
