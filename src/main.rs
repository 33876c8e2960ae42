use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use resort_booking_api::app::build_repository;
use resort_booking_api::config::{self, AppConfig, Environment};
use resort_booking_api::{AppState, create_app};

fn init_logger(env: Environment) {
    let log_level = match env {
        Environment::Development => "debug",
        Environment::Production => "info",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log_level.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables from .env file (if present)
    dotenv().ok();

    let app_config = AppConfig::from_env()?;
    config::init_environment(app_config.environment);
    init_logger(app_config.environment);

    // Connect the booking store once, bounded by the configured timeout
    let bookings = build_repository(&app_config).await?;
    let app = create_app(AppState::new(bookings), &app_config);

    let addr: SocketAddr = app_config.bind_address().parse()?;
    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Environment: {:?}", app_config.environment);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown signal received");
        })
        .await
        .map_err(|e| {
            tracing::error!(error.message = %e, "Failed to serve application");
            e
        })?;

    Ok(())
}
