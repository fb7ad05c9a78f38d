//! # Metrics Types
//!
//! Data structures for JSON stats API responses.

use serde::Serialize;
use std::collections::BTreeMap;

/// JSON response for GET /v1/stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Uptime in seconds since startup
    pub uptime_seconds: u64,
    pub farmers: usize,
    /// Records in the crop dataset, absent when it failed to load
    pub dataset_records: Option<usize>,
    pub recommendations: RecommendationStats,
}

/// Recommendation request counts.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationStats {
    pub total: u64,
    /// Outcome label -> count
    pub by_outcome: BTreeMap<String, u64>,
}

impl RecommendationStats {
    pub fn from_counts(by_outcome: BTreeMap<String, u64>) -> Self {
        Self {
            total: by_outcome.values().sum(),
            by_outcome,
        }
    }
}
