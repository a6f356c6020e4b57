use crate::config::{load_global_config, ConfigError, LoadedConfig};
use crate::review::ReviewRunner;

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

pub fn load_config() -> Result<LoadedConfig, String> {
    load_global_config().map_err(map_config_err)
}

pub fn build_runner(config: &LoadedConfig) -> Result<ReviewRunner, String> {
    ReviewRunner::from_config(config).map_err(map_config_err)
}
