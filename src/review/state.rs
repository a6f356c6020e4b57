use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Input,
    Review,
    Improvisation,
    Approval,
    Approved,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Input,
        Step::Review,
        Step::Improvisation,
        Step::Approval,
        Step::Approved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Review => "review",
            Self::Improvisation => "improvisation",
            Self::Approval => "approval",
            Self::Approved => "approved",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.as_str() == raw)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Coder,
    Peer,
    Manager,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Coder, Role::Peer, Role::Manager];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Coder => "coder",
            Self::Peer => "peer",
            Self::Manager => "manager",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single record threaded through a run. Each role returns a replacement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReviewState {
    pub code: String,
    pub step: Step,
}

impl ReviewState {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            step: Step::Input,
        }
    }

    pub fn with_step(self, step: Step) -> Self {
        Self { step, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_text_forms_parse_back() {
        for step in Step::ALL {
            assert_eq!(Step::parse(step.as_str()), Some(step));
        }
        assert_eq!(Step::parse("Approved"), None);
        assert_eq!(Step::parse("done"), None);
    }

    #[test]
    fn step_serializes_as_snake_case_tag() {
        let state = ReviewState::new("x=1").with_step(Step::Improvisation);
        let json = serde_json::to_string(&state).expect("serialize");
        assert_eq!(json, r#"{"code":"x=1","step":"improvisation"}"#);
    }

    #[test]
    fn fresh_state_starts_at_input() {
        let state = ReviewState::new("print('hi')");
        assert_eq!(state.step, Step::Input);
        assert_eq!(state.code, "print('hi')");
    }
}
