use crate::config::{Credentials, LoadedConfig};
use crate::provider::output_parse::parse_chat_completion;
use crate::provider::types::{ChatCompletionRequest, ChatMessage};
use crate::provider::{CompletionClient, ProviderError};
use std::time::Duration;

const ERROR_BODY_LIMIT: usize = 512;

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    api_base: String,
    api_key: String,
    model: String,
    agent: ureq::Agent,
}

impl ChatCompletionsClient {
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            api_base: api_base.into(),
            api_key: api_key.into(),
            model: model.into(),
            agent: builder.build(),
        }
    }

    pub fn from_config(config: &LoadedConfig) -> Result<Self, crate::config::ConfigError> {
        Self::from_parts(&config.settings, &config.credentials)
    }

    fn from_parts(
        settings: &crate::config::Settings,
        credentials: &Credentials,
    ) -> Result<Self, crate::config::ConfigError> {
        let api_key = credentials.require_completion_api_key()?;
        Ok(Self::new(
            settings.api_base.clone(),
            api_key,
            settings.model.clone(),
            settings.request_timeout(),
        ))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for ChatCompletionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsClient")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl CompletionClient for ChatCompletionsClient {
    fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = self.endpoint();
        let body = serde_json::to_value(ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        })
        .map_err(|err| ProviderError::Request {
            url: url.clone(),
            reason: format!("failed to encode request: {err}"),
        })?;

        let response = match self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set(
                "user-agent",
                concat!("peerflow/", env!("CARGO_PKG_VERSION")),
            )
            .send_json(body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(ProviderError::Status {
                    status,
                    body: body.chars().take(ERROR_BODY_LIMIT).collect(),
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(ProviderError::Request {
                    url,
                    reason: transport.to_string(),
                })
            }
        };

        let text = response
            .into_string()
            .map_err(|err| ProviderError::ParseFailure {
                reason: format!("failed to read response body: {err}"),
            })?;
        parse_chat_completion(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = ChatCompletionsClient::new("http://localhost:1/v1/", "k", "m", None);
        assert_eq!(client.endpoint(), "http://localhost:1/v1/chat/completions");
    }

    #[test]
    fn construction_requires_completion_key() {
        let err = ChatCompletionsClient::from_parts(&Settings::default(), &Credentials::default())
            .expect_err("missing key");
        assert!(err.to_string().contains("GROQ_API_KEY"));

        let credentials = Credentials {
            completion_api_key: Some("gsk-test".to_string()),
            ..Credentials::default()
        };
        let client =
            ChatCompletionsClient::from_parts(&Settings::default(), &credentials).expect("client");
        assert_eq!(client.model(), "qwen-2.5-32b");
        assert!(!format!("{client:?}").contains("gsk-test"));
    }
}
