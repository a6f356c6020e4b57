use crate::prompts::{PromptCatalog, PromptError};
use crate::provider::{CompletionClient, ProviderError};
use crate::review::{ReviewLog, ReviewState, Role, Step};
use serde::Serialize;
use serde_json::{Map, Value};

/// Steps a peer response may name.
pub const PEER_DECISIONS: [Step; 3] = [Step::Improvisation, Step::Approval, Step::Approved];

/// Step used when the peer response names none of [`PEER_DECISIONS`].
pub const PEER_DECISION_FALLBACK: Step = Step::Approval;

pub struct RoleContext<'a> {
    pub catalog: &'a PromptCatalog,
    pub client: &'a dyn CompletionClient,
    pub log: &'a ReviewLog,
}

#[derive(Debug, thiserror::Error)]
enum RoleCallError {
    #[error(transparent)]
    Prompt(#[from] PromptError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationOutcome {
    Completed,
    /// Peer answered with something outside the known decisions.
    Fallback { response: String },
    Failed { reason: String },
}

/// Exact match after trimming and lowercasing; `None` for anything else.
pub fn parse_peer_decision(response: &str) -> Option<Step> {
    let normalized = response.trim().to_lowercase();
    PEER_DECISIONS
        .into_iter()
        .find(|step| step.as_str() == normalized)
}

/// Total mapping from peer response text to the next step.
pub fn classify_peer_decision(response: &str) -> Step {
    match parse_peer_decision(response) {
        Some(step) => step,
        None => PEER_DECISION_FALLBACK,
    }
}

fn prompt_and_complete(
    ctx: &RoleContext<'_>,
    role: Role,
    code: &str,
) -> Result<String, RoleCallError> {
    let prompt = ctx.catalog.render(role, code)?;
    Ok(ctx.client.complete(&prompt)?)
}

pub fn coder(ctx: &RoleContext<'_>, state: ReviewState) -> ReviewState {
    invoke_role(ctx, Role::Coder, state).0
}

pub fn peer(ctx: &RoleContext<'_>, state: ReviewState) -> ReviewState {
    invoke_role(ctx, Role::Peer, state).0
}

pub fn manager(ctx: &RoleContext<'_>, state: ReviewState) -> ReviewState {
    invoke_role(ctx, Role::Manager, state).0
}

pub(crate) fn invoke_role(
    ctx: &RoleContext<'_>,
    role: Role,
    state: ReviewState,
) -> (ReviewState, InvocationOutcome) {
    ctx.log.record(
        "info",
        "role.started",
        Some(role),
        &format!("{role} started at step `{}`", state.step),
    );

    let result = prompt_and_complete(ctx, role, &state.code);
    let (next, outcome) = match (role, result) {
        (Role::Coder, Ok(code)) => (
            ReviewState {
                code,
                step: Step::Review,
            },
            InvocationOutcome::Completed,
        ),
        (Role::Manager, Ok(code)) => (
            ReviewState {
                code,
                step: Step::Approved,
            },
            InvocationOutcome::Completed,
        ),
        (Role::Peer, Ok(response)) => match parse_peer_decision(&response) {
            Some(step) => (state.with_step(step), InvocationOutcome::Completed),
            None => {
                ctx.log.record(
                    "warn",
                    "peer.fallback",
                    Some(role),
                    &format!(
                        "unrecognized decision `{}`; defaulting to `{PEER_DECISION_FALLBACK}`",
                        response.trim()
                    ),
                );
                (
                    state.with_step(PEER_DECISION_FALLBACK),
                    InvocationOutcome::Fallback { response },
                )
            }
        },
        (role, Err(err)) => {
            let step = match role {
                Role::Coder | Role::Peer => Step::Improvisation,
                Role::Manager => Step::Approval,
            };
            ctx.log.record(
                "error",
                "role.failed",
                Some(role),
                &format!("{role} failed: {err}"),
            );
            (
                state.with_step(step),
                InvocationOutcome::Failed {
                    reason: err.to_string(),
                },
            )
        }
    };

    let mut extra = Map::new();
    extra.insert("step".to_string(), Value::String(next.step.to_string()));
    extra.insert(
        "code_chars".to_string(),
        Value::from(next.code.chars().count()),
    );
    ctx.log.record_with(
        "info",
        "role.completed",
        Some(role),
        &format!("{role} finished at step `{}`", next.step),
        extra,
    );
    (next, outcome)
}
