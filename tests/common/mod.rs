//! Shared test utilities for advisor integration tests.
//!
//! Provides dataset fixtures, stub weather/chat services, and helpers for
//! driving the router with `tower::Service::call`.

#![allow(dead_code)]

use advisor::advisory::Dataset;
use advisor::api::{create_router, AppState, DatasetHandle};
use advisor::chat::{ChatAgent, ChatError};
use advisor::config::AdvisorConfig;
use advisor::profile::ProfileStore;
use advisor::weather::{WeatherError, WeatherProvider, WeatherReport};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::io::{Cursor, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tower::Service;

// =============================================================================
// Dataset Fixtures
// =============================================================================

pub const HEADER: &str = "location,soil_type,season,recommended_crop,benefits,fertilizer";

/// Small dataset covering every engine outcome.
pub const SAMPLE_CSV: &str = "\
location,soil_type,season,recommended_crop,benefits,fertilizer
Telangana,Black,Kharif,Cotton,High yield,Urea
Telangana,Black,Kharif,Soybean,Fixes nitrogen,SSP
Telangana,Red,Rabi,Groundnut,Drought tolerant,DAP
Punjab,Alluvial,Rabi,Wheat,Staple grain,\"NPK 12:32:16, Urea\"
";

/// Parse a CSV literal into a dataset.
pub fn dataset_from(csv: &str) -> Dataset {
    Dataset::from_reader(Cursor::new(csv.to_string())).unwrap()
}

pub fn sample_dataset() -> Dataset {
    dataset_from(SAMPLE_CSV)
}

/// Write CSV content to a temp file (kept alive by the returned handle).
pub fn write_dataset(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Path to the dataset shipped in the repository.
pub fn bundled_dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/crop_data.csv")
}

// =============================================================================
// Stub Services
// =============================================================================

/// Weather provider returning a fixed report and recording requested locations.
#[derive(Default)]
pub struct StubWeather {
    pub locations: Mutex<Vec<String>>,
    pub fail: bool,
}

#[async_trait]
impl WeatherProvider for StubWeather {
    fn name(&self) -> &str {
        "stub"
    }

    async fn current(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        self.locations.lock().unwrap().push(location.to_string());
        if self.fail {
            return Err(WeatherError::Upstream {
                status: 404,
                body: "city not found".to_string(),
            });
        }
        Ok(WeatherReport {
            location: location.to_string(),
            temperature: 30.0,
            description: "Clear Sky".to_string(),
            humidity: 50.0,
            wind_speed: 2.5,
        })
    }
}

/// Chat agent echoing the message back.
#[derive(Default)]
pub struct StubChat {
    pub messages: Mutex<Vec<String>>,
}

#[async_trait]
impl ChatAgent for StubChat {
    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    async fn reply(&self, message: &str) -> Result<String, ChatError> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(format!("I am your farming advisor.\n- {}", message))
    }
}

// =============================================================================
// App Builders
// =============================================================================

pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub weather: Arc<StubWeather>,
    pub chat: Arc<StubChat>,
}

/// Build an app with stub upstreams around the given dataset handle.
pub fn make_app(dataset: DatasetHandle) -> TestApp {
    make_app_with(dataset, StubWeather::default())
}

pub fn make_app_with(dataset: DatasetHandle, weather: StubWeather) -> TestApp {
    let weather = Arc::new(weather);
    let chat = Arc::new(StubChat::default());
    let state = Arc::new(AppState::with_services(
        Arc::new(AdvisorConfig::default()),
        Arc::new(ProfileStore::new()),
        dataset,
        weather.clone(),
        chat.clone(),
    ));
    TestApp {
        router: create_router(Arc::clone(&state)),
        state,
        weather,
        chat,
    }
}

/// App over `SAMPLE_CSV`.
pub fn sample_app() -> TestApp {
    make_app(DatasetHandle::from(sample_dataset()))
}

// =============================================================================
// Request Helpers
// =============================================================================

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send a request and decode the JSON response body.
pub async fn send(router: &mut axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.call(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, value)
}

/// Register a farmer with a full profile.
pub async fn register(router: &mut axum::Router, username: &str, soil: &str, season: &str, location: &str) {
    let (status, _) = send(
        router,
        json_request(
            "POST",
            "/v1/farmers",
            serde_json::json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "mobile": "9876543210",
                "location": location,
                "soil_type": soil,
                "season": season,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}
