//! # ClinicDesk API
//!
//! Web server for the clinic scheduling service. It exposes the slot
//! generator over HTTP so the booking screens can list free appointment
//! times for a doctor or room.
//!
//! ## Architecture
//!
//! - **Routes**: API endpoints and URL structure
//! - **Handlers**: turn raw path/query strings into typed values and call the core service
//! - **Middleware**: error-to-response mapping
//! - **Config**: environment configuration
//!
//! The availability store is injected as a trait object, so the router can be
//! driven by the PostgreSQL store in production and by mocks in tests.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use clinicdesk_core::{service::DEFAULT_MAX_RANGE_DAYS, store::AvailabilityStore};
use eyre::Result;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Server-wide defaults for slot generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSettings {
    /// Weekday policy used when a request does not say otherwise
    pub enforce_weekday_match: bool,
    /// Upper bound for the `days` parameter of range queries
    pub max_range_days: u32,
}

impl Default for SlotSettings {
    fn default() -> Self {
        Self {
            enforce_weekday_match: false,
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
        }
    }
}

impl From<&config::ApiConfig> for SlotSettings {
    fn from(config: &config::ApiConfig) -> Self {
        Self {
            enforce_weekday_match: config.enforce_weekday_match,
            max_range_days: config.slot_range_max_days,
        }
    }
}

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Source of availability windows
    pub store: Arc<dyn AvailabilityStore>,
    pub settings: SlotSettings,
}

/// Builds the application router with all routes attached to `state`.
pub fn app(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Slot endpoints
        .merge(routes::availability::routes())
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Starts the API server with the provided configuration and availability store
///
/// Installs the global tracing subscriber, builds the router, applies the
/// CORS, tracing and timeout layers and serves until the listener fails.
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # async fn run() -> eyre::Result<()> {
/// let config = clinicdesk_api::config::ApiConfig::from_env()?;
/// let pool = clinicdesk_db::create_pool(&config.database_url, config.database_max_connections).await?;
/// let store = Arc::new(clinicdesk_db::repositories::availability::PgAvailabilityStore::new(pool));
/// clinicdesk_api::start_server(config, store).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(
    config: config::ApiConfig,
    store: Arc<dyn AvailabilityStore>,
) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState {
        store,
        settings: SlotSettings::from(&config),
    });
    let app = app(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_origin(origins)
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Request tracing and timeout
    let app = app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout))),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
