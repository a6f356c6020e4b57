use crate::app::command_support::map_config_err;
use crate::config::{
    default_state_root, load_config_from, settings_path, Credentials, COMPLETION_API_KEY_ENV,
    TRACING_API_KEY_ENV, TRACING_PROJECT_ENV,
};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
struct DoctorFinding {
    id: String,
    ok: bool,
    detail: String,
    remediation: String,
}

fn doctor_finding(
    id: impl Into<String>,
    ok: bool,
    detail: impl Into<String>,
    remediation: impl Into<String>,
) -> DoctorFinding {
    DoctorFinding {
        id: id.into(),
        ok,
        detail: detail.into(),
        remediation: remediation.into(),
    }
}

fn now_nanos() -> i128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i128)
        .unwrap_or(0)
}

fn can_write_directory(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path).map_err(|e| format!("failed to create {}: {e}", path.display()))?;
    let probe = path.join(format!(".peerflow-doctor-{}", now_nanos()));
    fs::write(&probe, b"ok").map_err(|e| format!("failed to write {}: {e}", probe.display()))?;
    fs::remove_file(&probe).map_err(|e| format!("failed to remove {}: {e}", probe.display()))
}

pub fn cmd_doctor() -> Result<String, String> {
    let state_root = default_state_root().map_err(map_config_err)?;
    Ok(doctor_report(&state_root, Credentials::from_env()))
}

pub(crate) fn doctor_report(state_root: &Path, credentials: Credentials) -> String {
    let mut findings = Vec::new();

    let config_path = settings_path(state_root);
    findings.push(doctor_finding(
        "config.path",
        true,
        if config_path.exists() {
            format!("config={}", config_path.display())
        } else {
            format!("config={} (absent, defaults in use)", config_path.display())
        },
        "none",
    ));

    match load_config_from(state_root, credentials.clone()) {
        Ok(loaded) => findings.push(doctor_finding(
            "config.parse",
            true,
            format!(
                "model={} api_base={} max_role_invocations={}",
                loaded.settings.model,
                loaded.settings.api_base,
                loaded.settings.max_role_invocations
            ),
            "none",
        )),
        Err(err) => findings.push(doctor_finding(
            "config.parse",
            false,
            format!("settings load failed: {err}"),
            format!("fix {} and retry `peerflow doctor`", config_path.display()),
        )),
    }

    findings.push(doctor_finding(
        format!("env.{COMPLETION_API_KEY_ENV}"),
        credentials.completion_api_key.is_some(),
        "required for completion calls",
        format!("export {COMPLETION_API_KEY_ENV} before running a review"),
    ));

    let tracing_partial =
        credentials.tracing_api_key.is_some() != credentials.tracing_project.is_some();
    findings.push(doctor_finding(
        "env.tracing",
        !tracing_partial,
        match credentials.tracing_project.as_deref() {
            Some(project) if credentials.tracing_configured() => {
                format!("tracing_project={project}")
            }
            _ if tracing_partial => "tracing is partially configured".to_string(),
            _ => "tracing disabled".to_string(),
        },
        format!("set both {TRACING_API_KEY_ENV} and {TRACING_PROJECT_ENV}, or neither"),
    ));

    let logs_dir = state_root.join("logs");
    findings.push(match can_write_directory(&logs_dir) {
        Ok(()) => doctor_finding(
            "state.logs",
            true,
            format!("writable={}", logs_dir.display()),
            "none",
        ),
        Err(err) => doctor_finding(
            "state.logs",
            false,
            err,
            "grant write permission to the state root or set PEERFLOW_HOME",
        ),
    });

    let failed = findings.iter().filter(|f| !f.ok).count();
    let summary = if failed == 0 { "healthy" } else { "unhealthy" };
    let mut lines = vec![
        format!("summary={summary}"),
        format!("checks_total={}", findings.len()),
        format!("checks_failed={failed}"),
    ];
    for finding in findings {
        lines.push(format!(
            "check:{}={}",
            finding.id,
            if finding.ok { "ok" } else { "fail" }
        ));
        lines.push(format!("check:{}.detail={}", finding.id, finding.detail));
        if !finding.ok {
            lines.push(format!(
                "check:{}.remediation={}",
                finding.id, finding.remediation
            ));
        }
    }
    lines.join("\n")
}
