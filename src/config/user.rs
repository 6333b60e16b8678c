//! User configuration loading for target-pipeline.
//!
//! User config location: $XDG_CONFIG_HOME/target-pipeline/target-pipeline.toml
//! Fallback: the platform config directory reported by `dirs`.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::PipelineSettings;

const CONFIG_DIR: &str = "target-pipeline";
const CONFIG_FILE: &str = "target-pipeline.toml";

#[derive(Debug, Error)]
pub enum UserConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type UserConfigResult<T> = Result<T, UserConfigError>;

/// Returns the path to the user configuration file.
///
/// The path is determined by:
/// 1. If $XDG_CONFIG_HOME is set: $XDG_CONFIG_HOME/target-pipeline/target-pipeline.toml
/// 2. Otherwise: `dirs::config_dir()`/target-pipeline/target-pipeline.toml
///
/// Returns None if no config directory can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join(CONFIG_DIR).join(CONFIG_FILE));
    }

    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Read and parse one settings file.
pub fn load_config_file(path: &Path) -> UserConfigResult<PipelineSettings> {
    let content = std::fs::read_to_string(path).map_err(|source| UserConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    PipelineSettings::from_toml(&content).map_err(|source| UserConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the user configuration, if one exists.
///
/// A missing file is not an error; an unreadable or invalid one is.
pub fn load_user_config() -> UserConfigResult<Option<PipelineSettings>> {
    let Some(path) = user_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        log::debug!(
            target: "target_pipeline::config",
            "no user config at {}",
            path.display()
        );
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}
