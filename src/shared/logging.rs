use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn log_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Appends one JSON object per line. Logging is best effort and never fails the caller.
pub fn append_json_log_line(path: &Path, level: &str, event: &str, fields: Map<String, Value>) {
    let mut payload = Map::new();
    payload.insert("timestamp".to_string(), Value::String(log_timestamp()));
    payload.insert("level".to_string(), Value::String(level.to_string()));
    payload.insert("event".to_string(), Value::String(event.to_string()));
    payload.extend(fields);

    let Ok(line) = serde_json::to_string(&Value::Object(payload)) else {
        return;
    };

    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = writeln!(file, "{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn appends_one_json_object_per_line() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("logs/review.log");

        append_json_log_line(&path, "info", "first", Map::new());
        let mut fields = Map::new();
        fields.insert("role".to_string(), Value::String("peer".to_string()));
        append_json_log_line(&path, "warn", "second", fields);

        let raw = fs::read_to_string(&path).expect("read log");
        let lines: Vec<Value> = raw
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["event"], "first");
        assert_eq!(lines[1]["level"], "warn");
        assert_eq!(lines[1]["role"], "peer");
        assert!(lines[1]["timestamp"].as_str().expect("ts").ends_with('Z'));
    }

    #[test]
    fn unwritable_location_is_ignored() {
        let dir = tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not dir").expect("write blocker");
        append_json_log_line(&blocker.join("review.log"), "info", "x", Map::new());
    }
}
