//! # Advisor HTTP API
//!
//! JSON endpoints for farmer profiles, crop recommendations, and the
//! weather and chat proxies.
//!
//! ## Endpoints
//!
//! - `POST /v1/farmers` - Register a farmer
//! - `GET /v1/farmers/:username` - Account and profile
//! - `PUT /v1/farmers/:username/profile` - Edit (or create) the profile
//! - `GET /v1/farmers/:username/recommendations` - Crops for the stored profile
//! - `GET /v1/farmers/:username/weather` - Weather at the farmer's location
//! - `POST /v1/recommendations` - Crops for an inline profile
//! - `GET /v1/weather?location=` - Weather at an explicit location
//! - `POST /v1/chat` - Farming chatbot
//! - `GET /health` - Service health
//! - `GET /metrics`, `GET /v1/stats` - Observability
//!
//! ## Example
//!
//! ```no_run
//! use advisor::api::{create_router, AppState, DatasetHandle};
//! use advisor::config::AdvisorConfig;
//! use advisor::profile::ProfileStore;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(AdvisorConfig::default());
//! let dataset = DatasetHandle::load(Path::new("data/crop_data.csv"));
//! let state = Arc::new(AppState::new(config, Arc::new(ProfileStore::new()), dataset));
//!
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Request errors use a JSON envelope:
//! ```json
//! {
//!   "error": {
//!     "message": "Farmer 'ravi' not found",
//!     "type": "invalid_request_error",
//!     "param": "username",
//!     "code": "farmer_not_found"
//!   }
//! }
//! ```
//! Recommendation diagnostics and proxy failures are not errors at this
//! level: they are part of a 200 response body.

mod chat;
mod farmers;
mod health;
mod recommendations;
pub mod types;
mod weather;

pub use types::*;

use crate::advisory::{Dataset, DatasetError};
use crate::chat::{ChatAgent, OpenAICompatAgent};
use crate::config::AdvisorConfig;
use crate::logging::request_id_middleware;
use crate::metrics::MetricsCollector;
use crate::profile::ProfileStore;
use crate::weather::{OpenWeatherProvider, WeatherProvider};
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (64 KB); every payload is a small form.
const MAX_BODY_SIZE: usize = 64 * 1024;

/// The crop dataset as seen by request handlers.
///
/// A load failure is kept rather than aborting startup, so every
/// recommendation request can report it.
#[derive(Debug, Clone)]
pub enum DatasetHandle {
    Loaded(Arc<Dataset>),
    Unavailable(String),
}

impl DatasetHandle {
    /// Load the dataset, recording (not propagating) a failure.
    pub fn load(path: &Path) -> Self {
        Self::from(Dataset::load(path))
    }

    /// The dataset, or the reason it is missing.
    pub fn get(&self) -> Result<&Dataset, &str> {
        match self {
            DatasetHandle::Loaded(dataset) => Ok(dataset.as_ref()),
            DatasetHandle::Unavailable(reason) => Err(reason.as_str()),
        }
    }

    pub fn record_count(&self) -> Option<usize> {
        self.get().ok().map(Dataset::len)
    }
}

impl From<Dataset> for DatasetHandle {
    fn from(dataset: Dataset) -> Self {
        DatasetHandle::Loaded(Arc::new(dataset))
    }
}

impl From<Result<Dataset, DatasetError>> for DatasetHandle {
    fn from(result: Result<Dataset, DatasetError>) -> Self {
        match result {
            Ok(dataset) => dataset.into(),
            Err(e) => {
                tracing::error!(error = %e, "Crop dataset unavailable, recommendations disabled");
                DatasetHandle::Unavailable(e.to_string())
            }
        }
    }
}

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<AdvisorConfig>,
    pub profiles: Arc<ProfileStore>,
    pub dataset: DatasetHandle,
    pub weather: Arc<dyn WeatherProvider>,
    pub chat: Arc<dyn ChatAgent>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    /// Metrics collector for observability
    pub metrics_collector: Arc<MetricsCollector>,
}

impl AppState {
    /// Create application state with the configured upstream clients.
    pub fn new(
        config: Arc<AdvisorConfig>,
        profiles: Arc<ProfileStore>,
        dataset: DatasetHandle,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        let weather = Arc::new(OpenWeatherProvider::from_config(
            &config.weather,
            http_client.clone(),
        ));
        let chat = Arc::new(OpenAICompatAgent::from_config(
            &config.chat,
            Arc::new(http_client),
        ));

        Self::with_services(config, profiles, dataset, weather, chat)
    }

    /// Create application state around explicit weather and chat services.
    pub fn with_services(
        config: Arc<AdvisorConfig>,
        profiles: Arc<ProfileStore>,
        dataset: DatasetHandle,
        weather: Arc<dyn WeatherProvider>,
        chat: Arc<dyn ChatAgent>,
    ) -> Self {
        let start_time = Instant::now();

        let prometheus_handle = crate::metrics::setup_metrics().unwrap_or_else(|e| {
            // Already installed (e.g., in tests): render from a detached recorder
            tracing::debug!("Metrics already initialized, creating new handle: {}", e);
            crate::metrics::detached_handle()
        });

        Self {
            config,
            profiles,
            dataset,
            weather,
            chat,
            start_time,
            metrics_collector: Arc::new(MetricsCollector::new(start_time, prometheus_handle)),
        }
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = state.config.server.request_timeout();

    Router::new()
        .route("/v1/farmers", post(farmers::register))
        .route("/v1/farmers/:username", get(farmers::get))
        .route("/v1/farmers/:username/profile", put(farmers::edit_profile))
        .route(
            "/v1/farmers/:username/recommendations",
            get(recommendations::for_farmer),
        )
        .route("/v1/farmers/:username/weather", get(weather::for_farmer))
        .route("/v1/recommendations", post(recommendations::for_profile))
        .route("/v1/weather", get(weather::for_location))
        .route("/v1/chat", post(chat::handle))
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .route("/v1/stats", get(crate::metrics::handler::stats_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .with_state(state)
}
