//! Health check endpoint handler.

use crate::api::{AppState, DatasetHandle};
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub farmers: usize,
    pub dataset: DatasetHealth,
}

/// Reference dataset status.
#[derive(Debug, Serialize)]
pub struct DatasetHealth {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&DatasetHandle> for DatasetHealth {
    fn from(handle: &DatasetHandle) -> Self {
        match handle {
            DatasetHandle::Loaded(dataset) => DatasetHealth {
                available: true,
                records: Some(dataset.len()),
                source: dataset.source().map(|p| p.display().to_string()),
                error: None,
            },
            DatasetHandle::Unavailable(reason) => DatasetHealth {
                available: false,
                records: None,
                source: None,
                error: Some(reason.clone()),
            },
        }
    }
}

/// GET /health - Return service health.
///
/// "degraded" while the dataset is unavailable; profiles, weather and chat
/// keep working.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dataset = DatasetHealth::from(&state.dataset);
    let status = if dataset.available { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        farmers: state.profiles.count(),
        dataset,
    })
}
