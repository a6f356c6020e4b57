use crate::config::PromptOverrides;
use crate::review::Role;

pub const CODE_PLACEHOLDER: &str = "code";

const CODER_PROMPT_TEMPLATE: &str = include_str!("assets/coder.prompt.md");
const PEER_PROMPT_TEMPLATE: &str = include_str!("assets/peer.prompt.md");
const MANAGER_PROMPT_TEMPLATE: &str = include_str!("assets/manager.prompt.md");

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("unclosed placeholder in `{role}` template")]
    UnclosedPlaceholder { role: Role },
    #[error("empty placeholder in `{role}` template")]
    EmptyPlaceholder { role: Role },
    #[error("unknown placeholder `{token}` in `{role}` template")]
    UnknownPlaceholder { role: Role, token: String },
    #[error("`{role}` template must contain exactly one `code` placeholder, found {found}")]
    PlaceholderCount { role: Role, found: usize },
}

impl PromptError {
    pub fn role(&self) -> Role {
        match self {
            Self::UnclosedPlaceholder { role }
            | Self::EmptyPlaceholder { role }
            | Self::UnknownPlaceholder { role, .. }
            | Self::PlaceholderCount { role, .. } => *role,
        }
    }
}

/// Role templates. Every role always has a template, so lookups cannot miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptCatalog {
    coder: String,
    peer: String,
    manager: String,
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self {
            coder: CODER_PROMPT_TEMPLATE.trim_end().to_string(),
            peer: PEER_PROMPT_TEMPLATE.trim_end().to_string(),
            manager: MANAGER_PROMPT_TEMPLATE.trim_end().to_string(),
        }
    }
}

impl PromptCatalog {
    pub fn with_overrides(mut self, overrides: &PromptOverrides) -> Self {
        if let Some(template) = overrides.coder.as_ref() {
            self.coder = template.clone();
        }
        if let Some(template) = overrides.peer.as_ref() {
            self.peer = template.clone();
        }
        if let Some(template) = overrides.manager.as_ref() {
            self.manager = template.clone();
        }
        self
    }

    pub fn template(&self, role: Role) -> &str {
        match role {
            Role::Coder => &self.coder,
            Role::Peer => &self.peer,
            Role::Manager => &self.manager,
        }
    }

    pub fn validate(&self) -> Result<(), PromptError> {
        for role in Role::ALL {
            let found = placeholder_tokens(role, self.template(role))?
                .into_iter()
                .filter(|token| *token == CODE_PLACEHOLDER)
                .count();
            if found != 1 {
                return Err(PromptError::PlaceholderCount { role, found });
            }
        }
        Ok(())
    }

    pub fn render(&self, role: Role, code: &str) -> Result<String, PromptError> {
        render_template_with_placeholders(role, self.template(role), |token| {
            if token == CODE_PLACEHOLDER {
                Ok(code.to_string())
            } else {
                Err(PromptError::UnknownPlaceholder {
                    role,
                    token: token.to_string(),
                })
            }
        })
    }
}

fn placeholder_tokens(role: Role, template: &str) -> Result<Vec<String>, PromptError> {
    let mut tokens = Vec::new();
    render_template_with_placeholders(role, template, |token| {
        if token != CODE_PLACEHOLDER {
            return Err(PromptError::UnknownPlaceholder {
                role,
                token: token.to_string(),
            });
        }
        tokens.push(token.to_string());
        Ok(String::new())
    })?;
    Ok(tokens)
}

fn render_template_with_placeholders<F>(
    role: Role,
    template: &str,
    mut resolve: F,
) -> Result<String, PromptError>
where
    F: FnMut(&str) -> Result<String, PromptError>,
{
    let mut rendered = String::with_capacity(template.len());
    let mut cursor = template;

    while let Some(start) = cursor.find("{{") {
        rendered.push_str(&cursor[..start]);
        let after_open = &cursor[start + 2..];
        let Some(close_offset) = after_open.find("}}") else {
            return Err(PromptError::UnclosedPlaceholder { role });
        };
        let token = after_open[..close_offset].trim();
        if token.is_empty() {
            return Err(PromptError::EmptyPlaceholder { role });
        }
        rendered.push_str(&resolve(token)?);
        cursor = &after_open[close_offset + 2..];
    }

    rendered.push_str(cursor);
    Ok(rendered)
}
