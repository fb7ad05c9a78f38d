//! Conjunctive exact matching of a validated profile against the dataset.

use super::dataset::{AgronomicRecord, Dataset};
use super::normalize::NormalizedProfile;

/// Maximum number of crops suggested per query.
pub const MAX_SUGGESTIONS: usize = 3;

/// Records whose soil, season and location all equal the profile's, first
/// [`MAX_SUGGESTIONS`] in dataset order. No scoring, no re-ranking.
pub fn match_records<'d>(
    profile: &NormalizedProfile<'_>,
    dataset: &'d Dataset,
) -> Vec<&'d AgronomicRecord> {
    let positions =
        dataset.positions_for_triple(&profile.soil_type, &profile.season, &profile.location);

    tracing::debug!(
        soil_type = %profile.soil_type,
        season = %profile.season,
        location = %profile.location,
        total_matches = positions.len(),
        "Matched dataset records"
    );

    positions
        .iter()
        .take(MAX_SUGGESTIONS)
        .filter_map(|&pos| dataset.record(pos))
        .collect()
}
