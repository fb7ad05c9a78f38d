//! Reference dataset loading and indexing.
//!
//! The dataset is a UTF-8 CSV file with a header row containing at least the
//! columns in [`REQUIRED_COLUMNS`]. Column order is irrelevant and unknown
//! columns are ignored. Records keep source order; nothing is deduplicated or
//! sorted, so every lookup below returns positions in dataset order.

use super::normalize::{normalize_field, title_case};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns every dataset header must contain (exact, case-sensitive).
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "location",
    "soil_type",
    "season",
    "recommended_crop",
    "benefits",
    "fertilizer",
];

/// One row of the reference dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgronomicRecord {
    pub location: String,
    pub soil_type: String,
    pub season: String,
    pub recommended_crop: String,
    pub benefits: String,
    pub fertilizer: String,
}

impl AgronomicRecord {
    pub fn new(
        location: &str,
        soil_type: &str,
        season: &str,
        recommended_crop: &str,
        benefits: &str,
        fertilizer: &str,
    ) -> Self {
        Self {
            location: location.to_string(),
            soil_type: soil_type.to_string(),
            season: season.to_string(),
            recommended_crop: recommended_crop.to_string(),
            benefits: benefits.to_string(),
            fertilizer: fertilizer.to_string(),
        }
    }
}

/// Errors raised while loading the dataset.
///
/// Any of these makes the dataset unavailable for the lifetime of the process.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Malformed dataset at line {line}: {message}")]
    Malformed { line: u64, message: String },
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => DatasetError::Io(io),
            _ => DatasetError::Malformed { line, message },
        }
    }
}

/// Normalized (soil, season, location) of a record, computed once at load.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RecordKey {
    soil_type: String,
    season: String,
    location: String,
}

/// Per-location overview used by `advisor dataset inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationSummary {
    /// Location as spelled by its first record
    pub location: String,
    /// Distinct soils, title-cased, first-seen order
    pub soils: Vec<String>,
    pub records: usize,
}

/// Immutable, indexed reference dataset.
///
/// Shared read-only between all requests (typically behind an `Arc`).
#[derive(Debug, Default)]
pub struct Dataset {
    records: Vec<AgronomicRecord>,
    keys: Vec<RecordKey>,
    by_location: HashMap<String, Vec<usize>>,
    by_triple: HashMap<(String, String, String), Vec<usize>>,
    location_order: Vec<String>,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Load the dataset from a CSV file.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        if !path.exists() {
            return Err(DatasetError::NotFound(path.to_path_buf()));
        }
        let file = std::fs::File::open(path)?;
        let mut dataset = Self::from_reader(file)?;
        dataset.source = Some(path.to_path_buf());

        tracing::info!(
            path = %path.display(),
            records = dataset.len(),
            locations = dataset.location_order.len(),
            "Loaded reference dataset"
        );
        Ok(dataset)
    }

    /// Parse the dataset from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::None)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(DatasetError::MissingColumn(column));
            }
        }

        let records = reader
            .deserialize::<AgronomicRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_records(records))
    }

    /// Build a dataset (and its indexes) from in-memory records.
    pub fn from_records(records: Vec<AgronomicRecord>) -> Self {
        let mut keys = Vec::with_capacity(records.len());
        let mut by_location: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_triple: HashMap<(String, String, String), Vec<usize>> = HashMap::new();
        let mut location_order = Vec::new();

        for (idx, record) in records.iter().enumerate() {
            let key = RecordKey {
                soil_type: normalize_field(&record.soil_type),
                season: normalize_field(&record.season),
                location: normalize_field(&record.location),
            };

            let positions = by_location.entry(key.location.clone()).or_default();
            if positions.is_empty() {
                location_order.push(key.location.clone());
            }
            positions.push(idx);

            by_triple
                .entry((
                    key.soil_type.clone(),
                    key.season.clone(),
                    key.location.clone(),
                ))
                .or_default()
                .push(idx);

            keys.push(key);
        }

        Self {
            records,
            keys,
            by_location,
            by_triple,
            location_order,
            source: None,
        }
    }

    pub fn records(&self) -> &[AgronomicRecord] {
        &self.records
    }

    pub fn record(&self, position: usize) -> Option<&AgronomicRecord> {
        self.records.get(position)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File the dataset was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Positions of all records for a normalized location, in dataset order.
    pub fn positions_for_location(&self, location: &str) -> &[usize] {
        self.by_location
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Positions of records matching a normalized triple, in dataset order.
    pub fn positions_for_triple(&self, soil_type: &str, season: &str, location: &str) -> &[usize] {
        self.by_triple
            .get(&(
                soil_type.to_string(),
                season.to_string(),
                location.to_string(),
            ))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Normalized soil type of the record at `position`.
    pub fn normalized_soil(&self, position: usize) -> Option<&str> {
        self.keys.get(position).map(|k| k.soil_type.as_str())
    }

    /// Distinct normalized soil types for a normalized location, first-seen order.
    pub fn soils_for_location(&self, location: &str) -> Vec<&str> {
        let mut soils: Vec<&str> = Vec::new();
        for soil in self
            .positions_for_location(location)
            .iter()
            .filter_map(|&pos| self.normalized_soil(pos))
        {
            if !soils.contains(&soil) {
                soils.push(soil);
            }
        }
        soils
    }

    /// One summary per location, in order of first appearance.
    pub fn location_summaries(&self) -> Vec<LocationSummary> {
        self.location_order
            .iter()
            .map(|loc| {
                let positions = self.positions_for_location(loc);
                LocationSummary {
                    location: self.records[positions[0]].location.trim().to_string(),
                    soils: self
                        .soils_for_location(loc)
                        .into_iter()
                        .map(title_case)
                        .collect(),
                    records: positions.len(),
                }
            })
            .collect()
    }
}
