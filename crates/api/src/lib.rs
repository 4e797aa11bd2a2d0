//! # DocSched API
//!
//! The API crate provides the web server for the DocSched service: doctor
//! availability and leave slots with overlap protection, plus booking tallies.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Extract requests and shape responses
//! - **Extract**: Body, path and query extractors with JSON rejections
//! - **Middleware**: Error-to-response mapping
//! - **Config**: Environment configuration
//!
//! Business rules live in `docsched-core` services; storage in `docsched-db`.

/// Configuration module for API settings
pub mod config;
/// Extractors that report rejections as `AppError`
pub mod extract;
/// Request handlers
pub mod handlers;
/// Error handling shared by every handler
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::{header, HeaderValue, Method},
    Router,
};
use docsched_core::{
    services::{BookingService, SlotService},
    store::{BookingStore, SlotStore},
};
use docsched_db::{DbPool, PgBookingStore, PgSlotStore};
use eyre::{Result, WrapErr};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```no_run
/// # async fn example(db_pool: docsched_db::DbPool) {
/// use std::sync::Arc;
/// use docsched_api::{app, ApiState};
///
/// let state = Arc::new(ApiState::with_postgres(db_pool));
/// let router = app(state);
/// # }
/// ```
pub struct ApiState {
    /// Checked slot writes and slot lookups
    pub slots: SlotService,
    /// Booking counts and their aggregates
    pub bookings: BookingService,
}

impl ApiState {
    pub fn new(slot_store: Arc<dyn SlotStore>, booking_store: Arc<dyn BookingStore>) -> Self {
        Self {
            slots: SlotService::new(slot_store),
            bookings: BookingService::new(booking_store),
        }
    }

    /// State backed by the PostgreSQL pool created at process start.
    pub fn with_postgres(db_pool: DbPool) -> Self {
        Self::new(
            Arc::new(PgSlotStore::new(db_pool.clone())),
            Arc::new(PgBookingStore::new(db_pool)),
        )
    }
}

/// Builds the application router with every route and request tracing.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Availability slot endpoints
        .merge(routes::slots::routes())
        // Booking tally endpoints
        .merge(routes::bookings::routes())
        // Attach shared state to all routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Starts the API server with the provided configuration and database connection
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `db_pool` - PostgreSQL connection pool handed to the stores
pub async fn start_server(config: config::ApiConfig, db_pool: DbPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::with_postgres(db_pool));
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("Invalid API_CORS_ORIGINS value")?;

        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(
                middleware::error_handling::handle_middleware_error,
            ))
            .timeout(Duration::from_secs(config.request_timeout)),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
