use super::ConfigError;

pub const COMPLETION_API_KEY_ENV: &str = "GROQ_API_KEY";
pub const TRACING_API_KEY_ENV: &str = "LANGCHAIN_API_KEY";
pub const TRACING_PROJECT_ENV: &str = "LANGCHAIN_PROJECT_NAME";
pub const COMPLETION_API_BASE_ENV: &str = "PEERFLOW_COMPLETION_API_BASE";

/// Out-of-band process settings. Secret values never appear in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub completion_api_key: Option<String>,
    pub tracing_api_key: Option<String>,
    pub tracing_project: Option<String>,
    pub completion_api_base: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            completion_api_key: read(COMPLETION_API_KEY_ENV),
            tracing_api_key: read(TRACING_API_KEY_ENV),
            tracing_project: read(TRACING_PROJECT_ENV),
            completion_api_base: read(COMPLETION_API_BASE_ENV),
        }
    }

    pub fn require_completion_api_key(&self) -> Result<&str, ConfigError> {
        self.completion_api_key
            .as_deref()
            .ok_or(ConfigError::MissingCredential {
                name: COMPLETION_API_KEY_ENV,
            })
    }

    pub fn tracing_configured(&self) -> bool {
        self.tracing_api_key.is_some() && self.tracing_project.is_some()
    }
}

fn presence(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "<set>"
    } else {
        "<unset>"
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("completion_api_key", &presence(&self.completion_api_key))
            .field("tracing_api_key", &presence(&self.tracing_api_key))
            .field("tracing_project", &self.tracing_project)
            .field("completion_api_base", &self.completion_api_base)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn blank_values_are_treated_as_unset() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (COMPLETION_API_KEY_ENV, "   "),
            (TRACING_PROJECT_ENV, "reviews"),
        ]));
        assert!(creds.completion_api_key.is_none());
        assert!(matches!(
            creds.require_completion_api_key(),
            Err(ConfigError::MissingCredential { name }) if name == COMPLETION_API_KEY_ENV
        ));
        assert!(!creds.tracing_configured());
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let creds = Credentials::from_lookup(lookup_from(&[
            (COMPLETION_API_KEY_ENV, "gsk-secret"),
            (TRACING_API_KEY_ENV, "ls-secret"),
            (TRACING_PROJECT_ENV, "reviews"),
        ]));
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("gsk-secret"));
        assert!(!rendered.contains("ls-secret"));
        assert!(rendered.contains("reviews"));
        assert!(creds.tracing_configured());
        assert_eq!(creds.require_completion_api_key().expect("key"), "gsk-secret");
    }
}
