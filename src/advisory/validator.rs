//! Soil availability validation.
//!
//! A farmer's soil type must exist in the dataset for their location before
//! any season/crop matching happens.

use super::dataset::Dataset;
use super::normalize::{title_case, NormalizedProfile};

/// Result of checking a profile's soil type against its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    /// The soil type does not occur for the location.
    ///
    /// `location` and `soil_type` are the profile's original values;
    /// `available` lists the location's soils title-cased, first-seen order.
    Invalid {
        location: String,
        soil_type: String,
        available: Vec<String>,
    },
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

/// Check the profile's soil type against the soils present for its location.
///
/// A location with no records at all yields `Invalid` with an empty list.
pub fn validate(profile: &NormalizedProfile<'_>, dataset: &Dataset) -> ValidationOutcome {
    let soils = dataset.soils_for_location(&profile.location);

    if soils.contains(&profile.soil_type.as_str()) {
        return ValidationOutcome::Valid;
    }

    tracing::debug!(
        location = %profile.location,
        soil_type = %profile.soil_type,
        available = soils.len(),
        "Soil type not present for location"
    );

    let original = profile.original();
    ValidationOutcome::Invalid {
        location: original.location.clone(),
        soil_type: original.soil_type.clone(),
        available: soils.into_iter().map(title_case).collect(),
    }
}
