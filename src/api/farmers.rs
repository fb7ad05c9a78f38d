//! Farmer registration and profile endpoints.

use crate::api::{ApiError, AppState};
use crate::profile::{FarmerAccount, ProfileUpdate, Registration};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

/// POST /v1/farmers - Register a farmer.
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> Result<(StatusCode, Json<FarmerAccount>), ApiError> {
    let Json(registration) = payload.map_err(|e| ApiError::bad_request(&e.body_text()))?;

    let account = state.profiles.register(registration).map_err(|e| {
        tracing::info!(error = %e, "Registration rejected");
        ApiError::from(e)
    })?;

    Ok((StatusCode::CREATED, Json(account)))
}

/// GET /v1/farmers/:username - Fetch an account with its profile.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<FarmerAccount>, ApiError> {
    state
        .profiles
        .get(&username)
        .map(Json)
        .ok_or_else(|| ApiError::farmer_not_found(&username))
}

/// PUT /v1/farmers/:username/profile - Edit (or create) a farmer's profile.
pub async fn edit_profile(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<FarmerAccount>, ApiError> {
    let Json(update) = payload.map_err(|e| ApiError::bad_request(&e.body_text()))?;

    let account = state.profiles.edit_profile(&username, update)?;
    Ok(Json(account))
}
