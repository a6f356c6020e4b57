use super::{default_state_root, settings_path, ConfigError, Credentials, Settings};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub state_root: PathBuf,
    pub settings: Settings,
    pub credentials: Credentials,
}

pub fn load_global_config() -> Result<LoadedConfig, ConfigError> {
    let state_root = default_state_root()?;
    load_config_from(&state_root, Credentials::from_env())
}

/// Missing settings file means defaults; a present but invalid one is an error.
pub fn load_config_from(
    state_root: &Path,
    credentials: Credentials,
) -> Result<LoadedConfig, ConfigError> {
    let path = settings_path(state_root);
    let mut settings = if path.exists() {
        Settings::from_path(&path)?
    } else {
        Settings::default()
    };
    if let Some(api_base) = credentials.completion_api_base.clone() {
        settings.api_base = api_base;
    }
    settings.validate()?;
    Ok(LoadedConfig {
        state_root: state_root.to_path_buf(),
        settings,
        credentials,
    })
}
