use crate::config::review_log_path;
use crate::review::Role;
use crate::shared::logging::append_json_log_line;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Per-run diagnostic trace written as JSON lines under the state root.
#[derive(Debug, Clone)]
pub struct ReviewLog {
    path: Option<PathBuf>,
    run_id: String,
}

impl ReviewLog {
    pub fn disabled(run_id: impl Into<String>) -> Self {
        Self {
            path: None,
            run_id: run_id.into(),
        }
    }

    pub fn for_state_root(state_root: &Path, run_id: impl Into<String>) -> Self {
        Self {
            path: Some(review_log_path(state_root)),
            run_id: run_id.into(),
        }
    }

    pub fn record(&self, level: &str, event: &str, role: Option<Role>, message: &str) {
        self.record_with(level, event, role, message, Map::new());
    }

    pub fn record_with(
        &self,
        level: &str,
        event: &str,
        role: Option<Role>,
        message: &str,
        extra: Map<String, Value>,
    ) {
        let Some(path) = self.path.as_ref() else {
            return;
        };
        let mut fields = Map::new();
        fields.insert("run_id".to_string(), Value::String(self.run_id.clone()));
        if let Some(role) = role {
            fields.insert("role".to_string(), Value::String(role.to_string()));
        }
        fields.insert("message".to_string(), Value::String(message.to_string()));
        fields.extend(extra);
        append_json_log_line(path, level, event, fields);
    }
}
