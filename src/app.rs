use std::sync::Arc;

use axum::{Extension, Router};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::{AppConfig, Environment, database};
use crate::repositories::{BookingRepository, MemoryBookingRepository, MySqlBookingRepository};

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<dyn BookingRepository>,
}

impl AppState {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    /// State backed by a fresh in-process store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBookingRepository::new()))
    }
}

fn cors_layer(allowed: &str) -> tower_http::cors::CorsLayer {
    use axum::http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue},
    };
    use tower_http::cors::{AllowOrigin, Any, CorsLayer};

    // "*" is permissive, anything else is a CSV of origins
    let origin = if allowed.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        let origins = allowed
            .split(',')
            .filter_map(|s| HeaderValue::from_str(s.trim()).ok())
            .collect::<Vec<HeaderValue>>();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}

pub fn build_router(config: &AppConfig) -> Router {
    let mut app = Router::new()
        .merge(crate::routes::health_routes::health_routes())
        .merge(crate::routes::booking_routes::booking_routes())
        .fallback(crate::handlers::health_handler::not_found)
        // Must follow the merges: it only reaches method routers already registered
        .method_not_allowed_fallback(crate::handlers::health_handler::not_found);

    if let Some(allowed) = config.cors_allowed_origins.as_deref() {
        app = app.layer(cors_layer(allowed));
    }

    app.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

pub fn create_app(state: AppState, config: &AppConfig) -> Router {
    build_router(config).layer(Extension(state))
}

/// Open the booking store selected by `DATABASE_URL`.
///
/// A MySQL connection failure is fatal in production. In development the server keeps
/// starting with a lazily connecting pool and `/health` reports the database as down.
pub async fn build_repository(config: &AppConfig) -> Result<Arc<dyn BookingRepository>, sqlx::Error> {
    if config.database.is_memory() {
        tracing::warn!("Using the in-memory booking store; data is lost on shutdown");
        return Ok(Arc::new(MemoryBookingRepository::new()));
    }

    let pool = match database::establish_connection(&config.database).await {
        Ok(pool) => pool,
        Err(e) if config.environment == Environment::Development => {
            tracing::warn!(error.message = %e, "Database connection failed; starting without database connection");
            database::lazy_connection(&config.database)?
        }
        Err(e) => return Err(e),
    };

    Ok(Arc::new(MySqlBookingRepository::new(pool)))
}
