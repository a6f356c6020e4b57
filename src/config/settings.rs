use super::ConfigError;
use crate::prompts::PromptCatalog;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "qwen-2.5-32b";
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MAX_ROLE_INVOCATIONS: u32 = 12;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
    #[serde(default = "default_max_role_invocations")]
    pub max_role_invocations: u32,
    #[serde(default)]
    pub prompts: PromptOverrides,
}

/// Per-role template replacements. Unset roles keep the built-in template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PromptOverrides {
    #[serde(default)]
    pub coder: Option<String>,
    #[serde(default)]
    pub peer: Option<String>,
    #[serde(default)]
    pub manager: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            request_timeout_seconds: None,
            max_role_invocations: default_max_role_invocations(),
            prompts: PromptOverrides::default(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_max_role_invocations() -> u32 {
    DEFAULT_MAX_ROLE_INVOCATIONS
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Settings("`model` must be non-empty".to_string()));
        }
        let api_base = self.api_base.trim();
        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(ConfigError::Settings(
                "`api_base` must be an http(s) url".to_string(),
            ));
        }
        if self.request_timeout_seconds == Some(0) {
            return Err(ConfigError::Settings(
                "`request_timeout_seconds` must be greater than 0".to_string(),
            ));
        }
        if self.max_role_invocations < 2 {
            // coder and peer always run once
            return Err(ConfigError::Settings(
                "`max_role_invocations` must be at least 2".to_string(),
            ));
        }
        self.prompt_catalog().validate().map_err(|err| ConfigError::Prompt {
            role: err.role().to_string(),
            reason: err.to_string(),
        })
    }

    pub fn prompt_catalog(&self) -> PromptCatalog {
        PromptCatalog::default().with_overrides(&self.prompts)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_mapping_uses_defaults() {
        let settings: Settings = serde_yaml::from_str("{}").expect("parse settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.model, "qwen-2.5-32b");
        assert_eq!(settings.max_role_invocations, 12);
        settings.validate().expect("defaults validate");
    }

    #[test]
    fn rejects_zero_timeout_and_tiny_invocation_cap() {
        let mut settings = Settings {
            request_timeout_seconds: Some(0),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        settings.request_timeout_seconds = Some(30);
        settings.max_role_invocations = 1;
        let err = settings.validate().expect_err("cap too small");
        assert!(err.to_string().contains("max_role_invocations"));
    }

    #[test]
    fn prompt_override_without_code_placeholder_is_rejected() {
        let settings: Settings = serde_yaml::from_str(
            r#"
prompts:
  manager: "Approve this without looking"
"#,
        )
        .expect("parse settings");

        let err = settings.validate().expect_err("invalid prompt");
        match err {
            ConfigError::Prompt { role, .. } => assert_eq!(role, "manager"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
