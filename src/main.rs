//! Mother's International Academy back office
//!
//! Main application entry point

use tracing::info;

use mia_backoffice::{
    config::Settings,
    handlers::{build_router, AppState},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration; missing data service credentials are fatal here
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard keeps the file writer alive until exit
    let _logging_guard = logging::init_logging(&settings.logging)?;

    info!("Starting MIA back-office server...");

    // Initialize services
    info!("Initializing services...");
    let services = ServiceFactory::new(settings.clone())?;

    let state = AppState::new(services);
    let app = build_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("MIA back-office server has been shut down.");

    Ok(())
}

/// Resolve on Ctrl-C so in-flight requests can finish
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown signal handler");
    }
}
