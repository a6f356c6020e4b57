pub mod env;
pub mod error;
pub mod load;
pub mod paths;
pub mod settings;

pub use env::{
    Credentials, COMPLETION_API_BASE_ENV, COMPLETION_API_KEY_ENV, TRACING_API_KEY_ENV,
    TRACING_PROJECT_ENV,
};
pub use error::ConfigError;
pub use load::{load_config_from, load_global_config, LoadedConfig};
pub use paths::{
    default_state_root, review_log_path, settings_path, GLOBAL_SETTINGS_FILE_NAME,
    GLOBAL_STATE_DIR, STATE_ROOT_ENV,
};
pub use settings::{
    PromptOverrides, Settings, DEFAULT_API_BASE, DEFAULT_MAX_ROLE_INVOCATIONS, DEFAULT_MODEL,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_settings_file_falls_back_to_defaults() {
        let dir = tempdir().expect("tempdir");
        let loaded = load_config_from(dir.path(), Credentials::default()).expect("load");
        assert_eq!(loaded.settings, Settings::default());
        assert_eq!(loaded.state_root, dir.path());
    }

    #[test]
    fn settings_file_and_api_base_override_are_applied() {
        let dir = tempdir().expect("tempdir");
        fs::write(
            settings_path(dir.path()),
            r#"
model: llama-3.3-70b-versatile
max_role_invocations: 6
prompts:
  coder: "Write code for: {{ code }}"
"#,
        )
        .expect("write settings");
        let credentials = Credentials {
            completion_api_base: Some("http://127.0.0.1:9".to_string()),
            ..Credentials::default()
        };

        let loaded = load_config_from(dir.path(), credentials).expect("load");
        assert_eq!(loaded.settings.model, "llama-3.3-70b-versatile");
        assert_eq!(loaded.settings.max_role_invocations, 6);
        assert_eq!(loaded.settings.api_base, "http://127.0.0.1:9");
        assert_eq!(
            loaded.settings.prompts.coder.as_deref(),
            Some("Write code for: {{ code }}")
        );
    }

    #[test]
    fn malformed_settings_file_reports_path() {
        let dir = tempdir().expect("tempdir");
        fs::write(settings_path(dir.path()), "model: [unterminated").expect("write settings");
        let err = load_config_from(dir.path(), Credentials::default()).expect_err("parse error");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("config.yaml"));
    }
}
