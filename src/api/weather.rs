//! Weather proxy endpoints.

use crate::api::{ApiError, AppState, WeatherQuery, WeatherResponse};
use crate::logging::message_preview;
use crate::metrics::ProxyService;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

/// GET /v1/farmers/:username/weather - Weather at the farmer's location.
///
/// Falls back to the configured default location when the farmer has no
/// location on file.
pub async fn for_farmer(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let account = state
        .profiles
        .get(&username)
        .ok_or_else(|| ApiError::farmer_not_found(&username))?;

    let location = account
        .profile
        .map(|p| p.location)
        .filter(|l| !l.trim().is_empty());

    Ok(Json(lookup(&state, location).await))
}

/// GET /v1/weather?location= - Weather at an explicit location.
pub async fn for_location(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Json<WeatherResponse> {
    let location = query.location.filter(|l| !l.trim().is_empty());
    Json(lookup(&state, location).await)
}

async fn lookup(state: &AppState, location: Option<String>) -> WeatherResponse {
    let location = location
        .map(|l| l.trim().to_string())
        .unwrap_or_else(|| state.config.weather.default_location.clone());

    let result = state.weather.current(&location).await;
    let status = match &result {
        Ok(_) => "success",
        Err(e) => {
            tracing::warn!(
                provider = state.weather.name(),
                location = %location,
                error = %message_preview(&e.to_string()),
                "Weather lookup failed"
            );
            e.label()
        }
    };
    state
        .metrics_collector
        .record_proxy_call(ProxyService::Weather, status);

    WeatherResponse::from(result)
}
