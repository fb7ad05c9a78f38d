//! Profile normalization.

use super::FarmerProfile;

/// A farmer profile prepared for comparison against the dataset.
///
/// Every field is trimmed and lower-cased; the original profile is kept for
/// user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedProfile<'a> {
    pub soil_type: String,
    pub season: String,
    pub location: String,
    original: &'a FarmerProfile,
}

impl<'a> NormalizedProfile<'a> {
    /// The profile as the farmer entered it.
    pub fn original(&self) -> &'a FarmerProfile {
        self.original
    }
}

/// Normalize a profile. Never fails.
pub fn normalize(profile: &FarmerProfile) -> NormalizedProfile<'_> {
    NormalizedProfile {
        soil_type: normalize_field(&profile.soil_type),
        season: normalize_field(&profile.season),
        location: normalize_field(&profile.location),
        original: profile,
    }
}

/// Canonical comparison form of a categorical value.
pub fn normalize_field(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Title-case a value for display: the first letter of every alphabetic run is
/// upper-cased and the rest lower-cased ("black cotton" -> "Black Cotton").
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_alpha = false;
    for c in value.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
