//! Log output settings

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Multi-line, colored output for a terminal
    #[default]
    Pretty,
    /// One JSON object per line for log shippers
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses `ADVISOR_LOG_FORMAT` values; case and surrounding whitespace are ignored.
impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "Invalid log format '{}', expected 'pretty' or 'json'",
                other
            )),
        }
    }
}

/// The `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level for everything, e.g. "info"
    pub level: String,
    pub format: LogFormat,
    /// Levels for individual modules of the crate, keyed by module name
    /// (`advisory`, `api`, `profile`, ...). Ordered so the rendered filter is stable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_levels: Option<BTreeMap<String, String>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_format_values() {
        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);

        let err = "logfmt".parse::<LogFormat>().unwrap_err();
        assert!(err.contains("'logfmt'"));
    }

    #[test]
    fn test_format_display_matches_config_spelling() {
        for format in [LogFormat::Pretty, LogFormat::Json] {
            let toml_value = toml::Value::try_from(format).unwrap();
            assert_eq!(toml_value.as_str(), Some(format.as_str()));
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_logging_section_with_component_levels() {
        let toml = r#"
        level = "warn"
        format = "json"

        [component_levels]
        profile = "trace"
        advisory = "debug"
        "#;

        let config: LoggingConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Json);

        let modules: Vec<_> = config
            .component_levels
            .unwrap()
            .into_keys()
            .collect();
        assert_eq!(modules, vec!["advisory", "profile"]);
    }

    #[test]
    fn test_empty_section_defaults() {
        let config: LoggingConfig = toml::from_str("").unwrap();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.component_levels.is_none());
    }
}
