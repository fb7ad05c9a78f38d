//! Structured logging helpers
//!
//! Filter directive construction, request ID middleware and small field
//! helpers shared by the request handlers.

pub mod fields;
pub mod middleware;

pub use fields::message_preview;
pub use middleware::{generate_request_id, request_id_middleware, RequestId, REQUEST_ID_HEADER};

/// Build filter directives string from LoggingConfig
///
/// Combines the base log level with any per-component levels.
///
/// # Returns
///
/// A filter string in the format: "base_level,advisor::component1=level1,advisor::component2=level2"
///
/// # Examples
///
/// ```
/// use advisor::config::{LogFormat, LoggingConfig};
/// use advisor::logging::build_filter_directives;
/// use std::collections::BTreeMap;
///
/// let mut component_levels = BTreeMap::new();
/// component_levels.insert("advisory".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// let filter_str = build_filter_directives(&config);
/// assert_eq!(filter_str, "info,advisor::advisory=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        for (component, level) in component_levels {
            filter_str.push_str(&format!(",advisor::{}={}", component, level));
        }
    }

    filter_str
}
