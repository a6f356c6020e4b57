#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid yaml in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("settings validation failed: {0}")]
    Settings(String),
    #[error("prompt `{role}` is invalid: {reason}")]
    Prompt { role: String, reason: String },
    #[error("missing required environment variable `{name}`")]
    MissingCredential { name: &'static str },
    #[error("failed to resolve home directory for state root")]
    HomeDirectoryUnavailable,
}
