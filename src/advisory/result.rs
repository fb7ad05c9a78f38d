//! Recommendation results and diagnostics.

use super::dataset::AgronomicRecord;
use super::validator::ValidationOutcome;
use super::FarmerProfile;
use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use std::fmt;

/// Message shown when a farmer has no usable profile.
pub const INCOMPLETE_PROFILE_MESSAGE: &str = "Profile not complete. Please update your profile.";

/// Display-ready copy of a matched record.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, Deserialize)]
pub struct CropSuggestion {
    pub name: String,
    pub soil: String,
    pub season: String,
    pub location: String,
    pub benefits: String,
    pub fertilizer: String,
}

impl From<&AgronomicRecord> for CropSuggestion {
    fn from(record: &AgronomicRecord) -> Self {
        Self {
            name: record.recommended_crop.clone(),
            soil: record.soil_type.clone(),
            season: record.season.clone(),
            location: record.location.clone(),
            benefits: record.benefits.clone(),
            fertilizer: record.fertilizer.clone(),
        }
    }
}

/// Why no crops could be suggested.
///
/// The variants are mutually exclusive and each renders a distinct message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The farmer's soil type does not occur in their region.
    InvalidSoilForRegion {
        location: String,
        soil_type: String,
        available: Vec<String>,
    },
    /// The soil is valid for the region but nothing matches the season.
    NoMatchFound {
        soil_type: String,
        season: String,
        location: String,
    },
    /// No profile (or a partially filled one); raised by the caller.
    IncompleteProfile,
    /// The reference dataset could not be loaded.
    DatasetUnavailable { reason: String },
}

impl Diagnostic {
    /// Stable machine-readable tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Diagnostic::InvalidSoilForRegion { .. } => "invalid_soil_for_region",
            Diagnostic::NoMatchFound { .. } => "no_match_found",
            Diagnostic::IncompleteProfile => "incomplete_profile",
            Diagnostic::DatasetUnavailable { .. } => "dataset_unavailable",
        }
    }

    /// User-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidSoilForRegion {
                location,
                soil_type,
                available,
            } => write!(
                f,
                "The state '{}' does not have the soil type '{}'. \
                 Available soil types here are: {}. \
                 So we recommend choosing crops based on these soil types.",
                location,
                soil_type,
                available.join(", ")
            ),
            Diagnostic::NoMatchFound {
                soil_type,
                season,
                location,
            } => write!(
                f,
                "No matching data found for Soil={}, Season={}, Location={}. \
                 Try updating your profile or consult an expert.",
                soil_type, season, location
            ),
            Diagnostic::IncompleteProfile => f.write_str(INCOMPLETE_PROFILE_MESSAGE),
            Diagnostic::DatasetUnavailable { reason } => {
                write!(f, "Crop dataset unavailable: {}", reason)
            }
        }
    }
}

/// Outcome of one recommendation query: suggestions or a diagnostic, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationResult {
    Crops(Vec<CropSuggestion>),
    Diagnostic(Diagnostic),
}

impl RecommendationResult {
    pub fn incomplete_profile() -> Self {
        RecommendationResult::Diagnostic(Diagnostic::IncompleteProfile)
    }

    pub fn dataset_unavailable(reason: impl Into<String>) -> Self {
        RecommendationResult::Diagnostic(Diagnostic::DatasetUnavailable {
            reason: reason.into(),
        })
    }

    /// Suggested crops; empty when a diagnostic was produced.
    pub fn crops(&self) -> &[CropSuggestion] {
        match self {
            RecommendationResult::Crops(crops) => crops,
            RecommendationResult::Diagnostic(_) => &[],
        }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            RecommendationResult::Crops(_) => None,
            RecommendationResult::Diagnostic(d) => Some(d),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RecommendationResult::Crops(_))
    }

    /// Label used for logs and metrics.
    pub fn outcome_label(&self) -> &'static str {
        match self {
            RecommendationResult::Crops(_) => "success",
            RecommendationResult::Diagnostic(d) => match d {
                Diagnostic::InvalidSoilForRegion { .. } => "invalid_soil",
                Diagnostic::NoMatchFound { .. } => "no_match",
                Diagnostic::IncompleteProfile => "incomplete_profile",
                Diagnostic::DatasetUnavailable { .. } => "dataset_unavailable",
            },
        }
    }
}

#[derive(serde::Serialize)]
struct ResultBody<'a> {
    crops: &'a [CropSuggestion],
    error: Option<DiagnosticBody<'a>>,
}

#[derive(serde::Serialize)]
struct DiagnosticBody<'a> {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    available_soils: Option<&'a [String]>,
}

/// Serialized as `{"crops": [...], "error": null | {"kind", "message"}}`.
impl Serialize for RecommendationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let error = self.diagnostic().map(|d| DiagnosticBody {
            kind: d.kind(),
            message: d.message(),
            available_soils: match d {
                Diagnostic::InvalidSoilForRegion { available, .. } => Some(available.as_slice()),
                _ => None,
            },
        });
        ResultBody {
            crops: self.crops(),
            error,
        }
        .serialize(serializer)
    }
}

/// Assemble the result for a profile from its validation outcome and matches.
///
/// `matches` is ignored for an invalid outcome (the matcher never ran).
pub fn build(
    profile: &FarmerProfile,
    outcome: ValidationOutcome,
    matches: &[&AgronomicRecord],
) -> RecommendationResult {
    match outcome {
        ValidationOutcome::Invalid {
            location,
            soil_type,
            available,
        } => RecommendationResult::Diagnostic(Diagnostic::InvalidSoilForRegion {
            location,
            soil_type,
            available,
        }),
        ValidationOutcome::Valid if matches.is_empty() => {
            RecommendationResult::Diagnostic(Diagnostic::NoMatchFound {
                soil_type: profile.soil_type.clone(),
                season: profile.season.clone(),
                location: profile.location.clone(),
            })
        }
        ValidationOutcome::Valid => RecommendationResult::Crops(
            matches.iter().map(|&record| CropSuggestion::from(record)).collect(),
        ),
    }
}
