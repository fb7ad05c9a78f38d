//! Dataset command implementation

use crate::advisory::Dataset;
use crate::cli::output::{format_locations_json, format_locations_table};
use crate::cli::DatasetInspectArgs;
use crate::config::AdvisorConfig;
use std::path::{Path, PathBuf};

/// Pick the dataset path: explicit flag, else the config file (when present),
/// else defaults, with `ADVISOR_*` environment overrides applied.
pub fn resolve_dataset_path(
    explicit: Option<&Path>,
    config_path: &Path,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }

    let config = if config_path.exists() {
        AdvisorConfig::load(Some(config_path))?
    } else {
        AdvisorConfig::default()
    };
    Ok(config.with_env_overrides().dataset.path)
}

/// Handle `advisor dataset inspect`
pub fn handle_dataset_inspect(
    args: &DatasetInspectArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let path = resolve_dataset_path(args.dataset.as_deref(), &args.config)?;
    let dataset = Dataset::load(&path)?;
    let locations = dataset.location_summaries();

    if args.json {
        Ok(format_locations_json(&locations)?)
    } else {
        Ok(format!(
            "{}\n{} records, {} locations ({})",
            format_locations_table(&locations),
            dataset.len(),
            locations.len(),
            path.display()
        ))
    }
}
