//! Crop recommendation endpoints.

use crate::advisory::{self, FarmerProfile, RecommendationResult};
use crate::api::{ApiError, AppState, ProfileQuery};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;

/// GET /v1/farmers/:username/recommendations
///
/// A farmer without a complete profile gets the incomplete-profile
/// diagnostic; the engine never runs in that case.
pub async fn for_farmer(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<RecommendationResult>, ApiError> {
    if !state.profiles.contains(&username) {
        return Err(ApiError::farmer_not_found(&username));
    }

    let result = match state.profiles.complete_profile(&username) {
        Some(profile) => run_engine(&state, &profile)?,
        None => RecommendationResult::incomplete_profile(),
    };

    finish(&state, Some(&username), result)
}

/// POST /v1/recommendations - Recommend for an inline profile.
pub async fn for_profile(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProfileQuery>, JsonRejection>,
) -> Result<Json<RecommendationResult>, ApiError> {
    let Json(query) = payload.map_err(|e| ApiError::bad_request(&e.body_text()))?;
    let profile = FarmerProfile::from(query);

    let result = if profile.is_complete() {
        run_engine(&state, &profile)?
    } else {
        RecommendationResult::incomplete_profile()
    };

    finish(&state, None, result)
}

fn run_engine(state: &AppState, profile: &FarmerProfile) -> Result<RecommendationResult, ApiError> {
    match state.dataset.get() {
        Ok(dataset) => Ok(advisory::recommend(profile, dataset)),
        Err(reason) => {
            let result = RecommendationResult::dataset_unavailable(reason);
            state
                .metrics_collector
                .record_recommendation(result.outcome_label());
            tracing::warn!(reason = %reason, "Recommendation requested without a dataset");
            let message = result
                .diagnostic()
                .map(|d| d.message())
                .unwrap_or_default();
            Err(ApiError::dataset_unavailable(&message))
        }
    }
}

fn finish(
    state: &AppState,
    username: Option<&str>,
    result: RecommendationResult,
) -> Result<Json<RecommendationResult>, ApiError> {
    state
        .metrics_collector
        .record_recommendation(result.outcome_label());

    tracing::info!(
        username = username.unwrap_or("-"),
        outcome = result.outcome_label(),
        crops = result.crops().len(),
        "Recommendation served"
    );

    Ok(Json(result))
}
