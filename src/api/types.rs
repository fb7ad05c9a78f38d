//! Request, response, and error types for the advisor HTTP API.

use crate::advisory::FarmerProfile;
use crate::profile::ProfileError;
use crate::weather::{WeatherError, WeatherReport};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Inline profile for POST /v1/recommendations.
///
/// Missing fields deserialize as empty strings so the engine reports an
/// incomplete profile instead of the request failing to parse.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProfileQuery {
    #[serde(default)]
    pub soil_type: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub location: String,
}

impl From<ProfileQuery> for FarmerProfile {
    fn from(query: ProfileQuery) -> Self {
        FarmerProfile {
            soil_type: query.soil_type,
            season: query.season,
            location: query.location,
        }
    }
}

/// Query string for GET /v1/weather.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherQuery {
    pub location: Option<String>,
}

/// Weather lookup result; upstream failures are data, not HTTP errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeatherResponse {
    Report(WeatherReport),
    Error { error: String },
}

impl From<Result<WeatherReport, WeatherError>> for WeatherResponse {
    fn from(result: Result<WeatherReport, WeatherError>) -> Self {
        match result {
            Ok(report) => WeatherResponse::Report(report),
            Err(e) => WeatherResponse::Error {
                error: e.to_string(),
            },
        }
    }
}

/// Body of POST /v1/chat.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

/// Response of POST /v1/chat.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// API error response envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    fn new(message: String, r#type: &str, param: Option<String>, code: &str) -> Self {
        Self {
            error: ApiErrorBody {
                message,
                r#type: r#type.to_string(),
                param,
                code: Some(code.to_string()),
            },
        }
    }

    /// Create a bad request error (400).
    pub fn bad_request(message: &str) -> Self {
        Self::new(
            message.to_string(),
            "invalid_request_error",
            None,
            "invalid_request_error",
        )
    }

    /// Create a bad request error (400) naming the offending field.
    pub fn invalid_field(field: &str, message: &str) -> Self {
        Self::new(
            message.to_string(),
            "invalid_request_error",
            Some(field.to_string()),
            "invalid_request_error",
        )
    }

    /// Create a farmer not found error (404).
    pub fn farmer_not_found(username: &str) -> Self {
        Self::new(
            format!("Farmer '{}' not found", username),
            "invalid_request_error",
            Some("username".to_string()),
            "farmer_not_found",
        )
    }

    /// Create a conflict error (409) for an already-registered farmer.
    pub fn conflict(message: &str, param: &str) -> Self {
        Self::new(
            message.to_string(),
            "invalid_request_error",
            Some(param.to_string()),
            "conflict",
        )
    }

    /// Create a dataset unavailable error (503).
    pub fn dataset_unavailable(message: &str) -> Self {
        Self::new(
            message.to_string(),
            "server_error",
            None,
            "dataset_unavailable",
        )
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self.error.code.as_deref() {
            Some("invalid_request_error") => StatusCode::BAD_REQUEST,
            Some("farmer_not_found") => StatusCode::NOT_FOUND,
            Some("conflict") => StatusCode::CONFLICT,
            Some("dataset_unavailable") => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        let message = err.to_string();
        match err {
            ProfileError::DuplicateUsername(_) => ApiError::conflict(&message, "username"),
            ProfileError::DuplicateEmail(_) => ApiError::conflict(&message, "email"),
            ProfileError::NotFound(username) => ApiError::farmer_not_found(&username),
            ProfileError::Invalid { field, .. } => ApiError::invalid_field(&field, &message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
