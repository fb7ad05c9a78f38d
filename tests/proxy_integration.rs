//! End-to-end tests for the weather and chat proxies against mock upstreams.

mod common;

use advisor::api::{create_router, AppState, DatasetHandle};
use advisor::config::AdvisorConfig;
use advisor::profile::ProfileStore;
use axum::http::StatusCode;
use common::{get, json_request, register, send};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Router wired to real upstream clients pointed at `server`.
///
/// Each test passes its own key variable names so parallel tests do not
/// share environment state.
fn proxied_router(server: &MockServer, weather_key_env: &str, chat_key_env: &str) -> axum::Router {
    router_for(proxied_config(server, weather_key_env, chat_key_env))
}

fn proxied_config(server: &MockServer, weather_key_env: &str, chat_key_env: &str) -> AdvisorConfig {
    let mut config = AdvisorConfig::default();
    config.weather.base_url = server.uri();
    config.weather.api_key_env = weather_key_env.to_string();
    config.chat.base_url = server.uri();
    config.chat.api_key_env = chat_key_env.to_string();
    config
}

fn router_for(config: AdvisorConfig) -> axum::Router {
    let state = AppState::new(
        Arc::new(config),
        Arc::new(ProfileStore::new()),
        DatasetHandle::from(common::sample_dataset()),
    );
    create_router(Arc::new(state))
}

#[tokio::test]
async fn test_weather_proxy_through_router() {
    std::env::set_var("ADVISOR_TEST_WEATHER_KEY_OK", "weather-key");
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Telangana"))
        .and(query_param("appid", "weather-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "main": {"temp": 31.5, "humidity": 48},
            "weather": [{"description": "scattered clouds"}],
            "wind": {"speed": 3.6}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut router = proxied_router(&server, "ADVISOR_TEST_WEATHER_KEY_OK", "ADVISOR_TEST_UNSET_1");
    register(&mut router, "ravi", "Black", "Kharif", "Telangana").await;

    let (status, body) = send(&mut router, get("/v1/farmers/ravi/weather")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "location": "Telangana",
            "temperature": 31.5,
            "description": "Scattered Clouds",
            "humidity": 48.0,
            "wind_speed": 3.6
        })
    );
}

#[tokio::test]
async fn test_weather_upstream_error_is_reported_in_body() {
    std::env::set_var("ADVISOR_TEST_WEATHER_KEY_ERR", "weather-key");
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&server)
        .await;

    let mut router = proxied_router(&server, "ADVISOR_TEST_WEATHER_KEY_ERR", "ADVISOR_TEST_UNSET_2");
    let (status, body) = send(&mut router, get("/v1/weather?location=Guntur")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"error": "Weather API error: 401 - Invalid API key"}));
}

#[tokio::test]
async fn test_weather_without_api_key() {
    let server = MockServer::start().await;
    let mut router = proxied_router(&server, "ADVISOR_TEST_UNSET_3", "ADVISOR_TEST_UNSET_4");

    let (status, body) = send(&mut router, get("/v1/weather?location=Guntur")).await;
    assert_eq!(status, StatusCode::OK);
    let error = body["error"].as_str().unwrap();
    assert!(error.starts_with("Unexpected error:"));
    assert!(error.contains("ADVISOR_TEST_UNSET_3"));
}

#[tokio::test]
async fn test_chat_proxy_through_router() {
    std::env::set_var("ADVISOR_TEST_CHAT_KEY_OK", "chat-key");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer chat-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-9",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "llama-3.1-8b-instant",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "I am your farming advisor.\n- Use neem oil."},
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut router = proxied_router(&server, "ADVISOR_TEST_UNSET_5", "ADVISOR_TEST_CHAT_KEY_OK");
    let (status, body) = send(
        &mut router,
        json_request("POST", "/v1/chat", json!({"message": "aphids on cotton"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "I am your farming advisor.\n- Use neem oil.");
}

#[tokio::test]
async fn test_chat_upstream_failure_becomes_reply() {
    std::env::set_var("ADVISOR_TEST_CHAT_KEY_ERR", "chat-key");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let mut router = proxied_router(&server, "ADVISOR_TEST_UNSET_6", "ADVISOR_TEST_CHAT_KEY_ERR");
    let (status, body) = send(
        &mut router,
        json_request("POST", "/v1/chat", json!({"message": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Error: Chat API error 503: overloaded");
}

#[tokio::test]
async fn test_blank_chat_never_reaches_upstream() {
    std::env::set_var("ADVISOR_TEST_CHAT_KEY_BLANK", "chat-key");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut router = proxied_router(&server, "ADVISOR_TEST_UNSET_7", "ADVISOR_TEST_CHAT_KEY_BLANK");
    let (_, body) = send(&mut router, json_request("POST", "/v1/chat", json!({"message": ""}))).await;
    assert_eq!(body["reply"], "Please enter a message.");
}

// =============================================================================
// Timeouts
// =============================================================================

#[tokio::test]
async fn test_slow_chat_upstream_times_out_as_reply() {
    std::env::set_var("ADVISOR_TEST_CHAT_KEY_SLOW", "chat-key");
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(2500)))
        .mount(&server)
        .await;

    let mut config = proxied_config(&server, "ADVISOR_TEST_UNSET_8", "ADVISOR_TEST_CHAT_KEY_SLOW");
    config.server.request_timeout_seconds = 3;
    config.chat.timeout_seconds = 1;
    assert!(config.validate().is_ok());

    let mut router = router_for(config);
    let (status, body) = send(
        &mut router,
        json_request("POST", "/v1/chat", json!({"message": "hello"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "Error: Request timeout after 1000ms");
}

#[tokio::test]
async fn test_slow_weather_upstream_times_out_as_error_body() {
    std::env::set_var("ADVISOR_TEST_WEATHER_KEY_SLOW", "weather-key");
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(2500)))
        .mount(&server)
        .await;

    let mut config =
        proxied_config(&server, "ADVISOR_TEST_WEATHER_KEY_SLOW", "ADVISOR_TEST_UNSET_9");
    config.server.request_timeout_seconds = 3;
    config.weather.timeout_seconds = 1;
    config.chat.timeout_seconds = 1;
    assert!(config.validate().is_ok());

    let mut router = router_for(config);
    let (status, body) = send(&mut router, get("/v1/weather?location=Guntur")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Unexpected error:"));
}
