use crate::config::{ConfigError, LoadedConfig, DEFAULT_MAX_ROLE_INVOCATIONS};
use crate::prompts::PromptCatalog;
use crate::provider::{ChatCompletionsClient, CompletionClient};
use crate::review::decision::{decide_next, Route};
use crate::review::roles::{invoke_role, InvocationOutcome, RoleContext};
use crate::review::{ReviewError, ReviewLog, ReviewState, Role, Step};
use crate::shared::ids::{generate_review_run_id, now_millis};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    /// Upper bound on role calls in one run, counting the first coder and peer.
    pub max_role_invocations: u32,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            max_role_invocations: DEFAULT_MAX_ROLE_INVOCATIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleInvocation {
    pub index: u32,
    pub role: Role,
    pub step_before: Step,
    pub step_after: Step,
    pub outcome: InvocationOutcome,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    pub run_id: String,
    pub state: ReviewState,
    pub invocations: Vec<RoleInvocation>,
}

impl ReviewOutcome {
    pub fn roles(&self) -> Vec<Role> {
        self.invocations.iter().map(|inv| inv.role).collect()
    }
}

#[derive(Clone)]
pub struct ReviewRunner {
    catalog: PromptCatalog,
    client: Arc<dyn CompletionClient>,
    limits: RunLimits,
    state_root: Option<PathBuf>,
    tracing_project: Option<String>,
}

impl ReviewRunner {
    pub fn new(catalog: PromptCatalog, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            catalog,
            client,
            limits: RunLimits::default(),
            state_root: None,
            tracing_project: None,
        }
    }

    pub fn from_config(config: &LoadedConfig) -> Result<Self, ConfigError> {
        let client = ChatCompletionsClient::from_config(config)?;
        let mut runner = Self::new(config.settings.prompt_catalog(), Arc::new(client))
            .with_limits(RunLimits {
                max_role_invocations: config.settings.max_role_invocations,
            })
            .with_state_root(&config.state_root);
        if config.credentials.tracing_configured() {
            runner.tracing_project = config.credentials.tracing_project.clone();
        }
        Ok(runner)
    }

    pub fn with_limits(mut self, limits: RunLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_state_root(mut self, state_root: &Path) -> Self {
        self.state_root = Some(state_root.to_path_buf());
        self
    }

    pub fn run(&self, code: &str) -> Result<ReviewOutcome, ReviewError> {
        if code.trim().is_empty() {
            return Err(ReviewError::EmptyInput);
        }

        let run_id = generate_review_run_id(now_millis());
        let log = match self.state_root.as_ref() {
            Some(root) => ReviewLog::for_state_root(root, run_id.clone()),
            None => ReviewLog::disabled(run_id.clone()),
        };

        let mut started = Map::new();
        started.insert(
            "max_role_invocations".to_string(),
            Value::from(self.limits.max_role_invocations),
        );
        if let Some(project) = self.tracing_project.as_ref() {
            started.insert("tracing_project".to_string(), Value::String(project.clone()));
        }
        log.record_with("info", "run.started", None, "review run started", started);

        let mut cursor = RunCursor {
            ctx: RoleContext {
                catalog: &self.catalog,
                client: self.client.as_ref(),
                log: &log,
            },
            limits: self.limits,
            invocations: Vec::new(),
        };

        match drive(&mut cursor, ReviewState::new(code)) {
            Ok(state) => {
                log.record(
                    "info",
                    "run.completed",
                    None,
                    &format!(
                        "review approved after {} role invocations",
                        cursor.invocations.len()
                    ),
                );
                Ok(ReviewOutcome {
                    run_id,
                    state,
                    invocations: cursor.invocations,
                })
            }
            Err(err) => {
                log.record("error", "run.failed", None, &err.to_string());
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for ReviewRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewRunner")
            .field("limits", &self.limits)
            .field("state_root", &self.state_root)
            .field("tracing_project", &self.tracing_project)
            .finish_non_exhaustive()
    }
}

struct RunCursor<'a> {
    ctx: RoleContext<'a>,
    limits: RunLimits,
    invocations: Vec<RoleInvocation>,
}

impl RunCursor<'_> {
    fn invoke(&mut self, role: Role, state: ReviewState) -> Result<ReviewState, ReviewError> {
        let index = self.invocations.len() as u32;
        if index >= self.limits.max_role_invocations {
            return Err(ReviewError::MaxInvocationsExceeded {
                max_role_invocations: self.limits.max_role_invocations,
            });
        }

        let step_before = state.step;
        let started = Instant::now();
        let (next, outcome) = invoke_role(&self.ctx, role, state);
        self.invocations.push(RoleInvocation {
            index,
            role,
            step_before,
            step_after: next.step,
            outcome,
            elapsed_ms: started.elapsed().as_millis() as u64,
        });
        Ok(next)
    }
}

fn drive(cursor: &mut RunCursor<'_>, initial: ReviewState) -> Result<ReviewState, ReviewError> {
    let drafted = cursor.invoke(Role::Coder, initial)?;
    let mut state = cursor.invoke(Role::Peer, drafted)?;

    loop {
        let route = decide_next(state.step)?;
        cursor.ctx.log.record(
            "info",
            "decision",
            None,
            &format!("step `{}` routes to {}", state.step, route_label(route)),
        );
        match route {
            Route::Done => return Ok(state),
            Route::Role(Role::Coder) => {
                let reworked = cursor.invoke(Role::Coder, state)?;
                state = cursor.invoke(Role::Peer, reworked)?;
            }
            Route::Role(role) => {
                state = cursor.invoke(role, state)?;
            }
        }
    }
}

fn route_label(route: Route) -> &'static str {
    match route {
        Route::Role(role) => role.as_str(),
        Route::Done => "done",
    }
}
