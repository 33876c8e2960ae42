use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::time::{Duration, sleep};

use crate::app::{AppState, create_app};
use crate::config::AppConfig;
use crate::repositories::BookingRepository;

/// Router over a fresh in-memory store, for in-process (`oneshot`) tests.
pub fn memory_app() -> Router {
    create_app(AppState::in_memory(), &AppConfig::in_memory())
}

/// Serve `app` on an ephemeral port and return the bound address.
/// The server task lives until the test runtime shuts down.
pub async fn spawn_server(app: Router) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app.into_make_service()).await {
            tracing::error!(error.message = %e, "test server stopped");
        }
    });
    // Give the server a moment to start
    sleep(Duration::from_millis(50)).await;
    Ok(addr)
}

/// Serve a booking API backed by `bookings` and return its base URL.
pub async fn spawn_booking_api(bookings: Arc<dyn BookingRepository>) -> std::io::Result<String> {
    let app = create_app(AppState::new(bookings), &AppConfig::in_memory());
    let addr = spawn_server(app).await?;
    Ok(format!("http://{}", addr))
}
