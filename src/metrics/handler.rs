//! # Metrics HTTP Handlers
//!
//! Axum handlers for metrics endpoints.

use super::{RecommendationStats, StatsResponse};
use crate::api::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

/// Handler for GET /metrics endpoint (Prometheus text format).
///
/// Always returns 200, even before any metric has been recorded.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state
        .metrics_collector
        .update_gauges(state.profiles.count(), state.dataset.record_count());

    let metrics = state.metrics_collector.render_metrics();
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        metrics,
    )
}

/// Handler for GET /v1/stats endpoint (JSON format).
pub async fn stats_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let collector = &state.metrics_collector;

    Json(StatsResponse {
        uptime_seconds: collector.uptime_seconds(),
        farmers: state.profiles.count(),
        dataset_records: state.dataset.record_count(),
        recommendations: RecommendationStats::from_counts(collector.recommendation_counts()),
    })
}
