use crate::review::Step;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("review input must not be empty")]
    EmptyInput,
    #[error("no role is routed from step `{step}`")]
    UnroutableStep { step: Step },
    #[error("review exceeded max role invocations ({max_role_invocations}) without approval")]
    MaxInvocationsExceeded { max_role_invocations: u32 },
}
