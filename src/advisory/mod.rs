//! # Crop Recommendation Engine
//!
//! Turns a farmer's profile (soil type, season, location) and the reference
//! dataset into at most three crop suggestions, or a diagnostic explaining why
//! none could be made.
//!
//! ## Pipeline
//!
//! 1. [`normalize`] - trim and lower-case the profile fields
//! 2. [`validate`] - the soil type must exist for the location
//! 3. [`match_records`] - conjunctive exact match, first three in dataset order
//! 4. [`build`] - suggestions or a diagnostic
//!
//! A soil/region mismatch short-circuits before matching. The engine is
//! synchronous and never mutates the dataset, so one `Arc<Dataset>` can serve
//! any number of concurrent queries.
//!
//! ## Example
//!
//! ```
//! use advisor::advisory::{recommend, AgronomicRecord, Dataset, FarmerProfile};
//!
//! let dataset = Dataset::from_records(vec![AgronomicRecord::new(
//!     "Telangana", "Black", "Kharif", "Cotton", "High yield", "Urea",
//! )]);
//!
//! let result = recommend(&FarmerProfile::new(" black ", "Kharif", "Telangana"), &dataset);
//! assert_eq!(result.crops()[0].name, "Cotton");
//! ```

pub mod dataset;
pub mod matcher;
pub mod normalize;
pub mod result;
pub mod validator;

pub use dataset::{AgronomicRecord, Dataset, DatasetError, LocationSummary, REQUIRED_COLUMNS};
pub use matcher::{match_records, MAX_SUGGESTIONS};
pub use normalize::{normalize, normalize_field, title_case, NormalizedProfile};
pub use result::{build, CropSuggestion, Diagnostic, RecommendationResult};
pub use validator::{validate, ValidationOutcome};

use serde::{Deserialize, Serialize};

/// The agronomic part of a farmer's profile.
///
/// Values are free text as the farmer entered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmerProfile {
    pub soil_type: String,
    pub season: String,
    pub location: String,
}

impl FarmerProfile {
    pub fn new(soil_type: &str, season: &str, location: &str) -> Self {
        Self {
            soil_type: soil_type.to_string(),
            season: season.to_string(),
            location: location.to_string(),
        }
    }

    /// True when soil type, season and location are all non-blank.
    pub fn is_complete(&self) -> bool {
        [&self.soil_type, &self.season, &self.location]
            .iter()
            .all(|v| !v.trim().is_empty())
    }
}

/// Run the full pipeline for a complete profile.
pub fn recommend(profile: &FarmerProfile, dataset: &Dataset) -> RecommendationResult {
    let normalized = normalize(profile);

    let result = match validate(&normalized, dataset) {
        invalid @ ValidationOutcome::Invalid { .. } => build(profile, invalid, &[]),
        ValidationOutcome::Valid => {
            let matches = match_records(&normalized, dataset);
            build(profile, ValidationOutcome::Valid, &matches)
        }
    };

    tracing::debug!(
        soil_type = %normalized.soil_type,
        season = %normalized.season,
        location = %normalized.location,
        outcome = result.outcome_label(),
        crops = result.crops().len(),
        "Recommendation computed"
    );

    result
}
