//! Output formatting helpers for CLI commands

use crate::advisory::{CropSuggestion, Diagnostic, LocationSummary, RecommendationResult};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// Format crop suggestions as a table
pub fn format_suggestions_table(crops: &[CropSuggestion]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Crop",
        "Soil",
        "Season",
        "Location",
        "Benefits",
        "Fertilizer",
    ]);

    for c in crops {
        table.add_row(vec![
            Cell::new(&c.name),
            Cell::new(&c.soil),
            Cell::new(&c.season),
            Cell::new(&c.location),
            Cell::new(&c.benefits),
            Cell::new(&c.fertilizer),
        ]);
    }

    table.to_string()
}

/// Format a diagnostic as a colored message
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    match diagnostic {
        Diagnostic::InvalidSoilForRegion { .. } => {
            format!("{} {}", "✗".red(), diagnostic.message().red())
        }
        Diagnostic::DatasetUnavailable { .. } => {
            format!("{} {}", "✗".red(), diagnostic.message().red())
        }
        Diagnostic::NoMatchFound { .. } | Diagnostic::IncompleteProfile => {
            format!("{} {}", "!".yellow(), diagnostic.message().yellow())
        }
    }
}

/// Format a recommendation result for the terminal
pub fn format_result(result: &RecommendationResult) -> String {
    match result {
        RecommendationResult::Crops(crops) => format_suggestions_table(crops),
        RecommendationResult::Diagnostic(d) => format_diagnostic(d),
    }
}

/// Format a recommendation result as JSON
pub fn format_result_json(result: &RecommendationResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

/// Format location summaries as a table
pub fn format_locations_table(locations: &[LocationSummary]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Location", "Soils", "Records"]);

    for l in locations {
        table.add_row(vec![
            Cell::new(&l.location),
            Cell::new(l.soils.join(", ")),
            Cell::new(l.records),
        ]);
    }

    table.to_string()
}

/// Format location summaries as JSON
pub fn format_locations_json(locations: &[LocationSummary]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "locations": locations
    }))
}
