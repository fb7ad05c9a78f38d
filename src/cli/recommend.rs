//! Recommend command implementation

use crate::advisory::{recommend, Dataset, Diagnostic, FarmerProfile, RecommendationResult};
use crate::cli::dataset::resolve_dataset_path;
use crate::cli::output::{format_result, format_result_json};
use crate::cli::RecommendArgs;

/// Handle `advisor recommend`
///
/// Diagnostics are normal output; only an unloadable dataset is an error.
pub fn handle_recommend(args: &RecommendArgs) -> Result<String, Box<dyn std::error::Error>> {
    let profile = FarmerProfile::new(&args.soil, &args.season, &args.location);

    let result = if profile.is_complete() {
        let path = resolve_dataset_path(args.dataset.as_deref(), &args.config)?;
        let dataset = Dataset::load(&path).map_err(|e| {
            Diagnostic::DatasetUnavailable {
                reason: e.to_string(),
            }
            .message()
        })?;
        recommend(&profile, &dataset)
    } else {
        RecommendationResult::incomplete_profile()
    };

    if args.json {
        Ok(format_result_json(&result)?)
    } else {
        Ok(format_result(&result))
    }
}
