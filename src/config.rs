pub mod settings;
pub mod user;

pub use settings::{DEFAULT_LOG_FILTER, HatSettings, LogSettings, PipelineSettings};
pub use user::{
    UserConfigError, UserConfigResult, load_config_file, load_user_config, user_config_path,
};

use std::path::Path;

/// Settings for one run: an explicit file wins over the user config, and
/// defaults apply when neither exists.
pub fn resolve_settings(explicit: Option<&Path>) -> UserConfigResult<PipelineSettings> {
    match explicit {
        Some(path) => load_config_file(path),
        None => Ok(load_user_config()?.unwrap_or_default()),
    }
}

impl From<UserConfigError> for crate::error::PipelineError {
    fn from(err: UserConfigError) -> Self {
        crate::error::PipelineError::config(err.to_string())
    }
}
