//! # Metrics Collection Module
//!
//! Prometheus export plus a small JSON stats view.
//!
//! ## Endpoints
//!
//! - `GET /metrics` - Prometheus text format metrics
//! - `GET /v1/stats` - JSON format statistics
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `advisor_recommendations_total{outcome}` - Recommendation requests by outcome
//! - `advisor_proxy_requests_total{service, status}` - Weather and chat proxy calls
//!
//! **Gauges:**
//! - `advisor_dataset_records` - Records in the loaded crop dataset
//! - `advisor_farmers_registered` - Registered farmers

pub mod handler;
pub mod types;

pub use types::*;

use dashmap::DashMap;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::collections::BTreeMap;
use std::time::Instant;

/// Proxied upstream services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyService {
    Weather,
    Chat,
}

impl ProxyService {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyService::Weather => "weather",
            ProxyService::Chat => "chat",
        }
    }
}

/// Records advisor metrics and renders them for scraping.
pub struct MetricsCollector {
    /// Service startup time for uptime calculation
    start_time: Instant,
    /// In-process outcome counts for the stats endpoint
    outcomes: DashMap<&'static str, u64>,
    /// Prometheus handle for rendering metrics
    prometheus_handle: PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(start_time: Instant, prometheus_handle: PrometheusHandle) -> Self {
        Self {
            start_time,
            outcomes: DashMap::new(),
            prometheus_handle,
        }
    }

    /// Count one recommendation request by its outcome label.
    pub fn record_recommendation(&self, outcome: &'static str) {
        metrics::counter!("advisor_recommendations_total", "outcome" => outcome).increment(1);
        *self.outcomes.entry(outcome).or_insert(0) += 1;
    }

    /// Count one weather or chat proxy call.
    pub fn record_proxy_call(&self, service: ProxyService, status: &'static str) {
        metrics::counter!(
            "advisor_proxy_requests_total",
            "service" => service.as_str(),
            "status" => status
        )
        .increment(1);
    }

    /// Refresh state gauges before rendering.
    pub fn update_gauges(&self, farmers: usize, dataset_records: Option<usize>) {
        metrics::gauge!("advisor_farmers_registered").set(farmers as f64);
        metrics::gauge!("advisor_dataset_records").set(dataset_records.unwrap_or(0) as f64);
    }

    /// Recommendation counts keyed by outcome label.
    pub fn recommendation_counts(&self) -> BTreeMap<String, u64> {
        self.outcomes
            .iter()
            .map(|entry| (entry.key().to_string(), *entry.value()))
            .collect()
    }

    /// Get uptime in seconds since startup.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Render Prometheus metrics in text format.
    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

/// Install the global Prometheus recorder.
///
/// Returns a PrometheusHandle that can be used to render metrics.
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    Ok(handle)
}

/// Handle for a recorder that is not installed globally.
///
/// Used when a recorder already exists in the process (tests, embedding).
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
