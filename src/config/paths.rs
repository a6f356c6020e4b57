use crate::config::ConfigError;
use std::path::{Path, PathBuf};

pub const GLOBAL_STATE_DIR: &str = ".peerflow";
pub const GLOBAL_SETTINGS_FILE_NAME: &str = "config.yaml";
pub const REVIEW_LOG_REL_PATH: &str = "logs/review.log";
pub const STATE_ROOT_ENV: &str = "PEERFLOW_HOME";

pub fn default_state_root() -> Result<PathBuf, ConfigError> {
    if let Some(root) = std::env::var_os(STATE_ROOT_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    let home = std::env::var_os("HOME").ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(PathBuf::from(home).join(GLOBAL_STATE_DIR))
}

pub fn settings_path(state_root: &Path) -> PathBuf {
    state_root.join(GLOBAL_SETTINGS_FILE_NAME)
}

pub fn review_log_path(state_root: &Path) -> PathBuf {
    state_root.join(REVIEW_LOG_REL_PATH)
}
