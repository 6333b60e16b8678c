use serde::{Deserialize, Serialize};

use crate::pipeline::DEFAULT_HAT_STYLE;

/// Log filter used when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Top-level settings, read from TOML.
///
/// ```toml
/// [hats]
/// default_style = "default"
///
/// [log]
/// filter = "warn"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineSettings {
    pub hats: HatSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HatSettings {
    /// Style assumed by decorated marks that name no color
    pub default_style: String,
}

impl Default for HatSettings {
    fn default() -> Self {
        Self {
            default_style: DEFAULT_HAT_STYLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// `env_logger` filter directive
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl PipelineSettings {
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let settings = PipelineSettings::from_toml("").unwrap();
        assert_eq!(settings, PipelineSettings::default());
        assert_eq!(settings.hats.default_style, "default");
        assert_eq!(settings.log.filter, "warn");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let settings = PipelineSettings::from_toml(
            r#"
            [hats]
            default_style = "blue"
            "#,
        )
        .unwrap();
        assert_eq!(settings.hats.default_style, "blue");
        assert_eq!(settings.log.filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        assert!(PipelineSettings::from_toml("[log]\nfilter = 3").is_err());
    }
}
