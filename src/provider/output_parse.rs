use crate::provider::types::ChatCompletionResponse;
use crate::provider::ProviderError;

/// Extracts the first choice's message content from a chat completions body.
pub fn parse_chat_completion(body: &str) -> Result<String, ProviderError> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|err| ProviderError::ParseFailure {
            reason: format!("invalid chat completion json: {err}"),
        })?;

    let Some(choice) = response.choices.into_iter().next() else {
        return Err(ProviderError::ParseFailure {
            reason: "response contained no choices".to_string(),
        });
    };
    let Some(content) = choice.message.content else {
        return Err(ProviderError::ParseFailure {
            reason: "first choice has no message content".to_string(),
        });
    };
    if content.trim().is_empty() {
        return Err(ProviderError::EmptyCompletion);
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_choice_content() {
        let body = r#"{"id":"c-1","choices":[{"index":0,"message":{"role":"assistant","content":"approved"}},{"index":1,"message":{"role":"assistant","content":"approval"}}]}"#;
        assert_eq!(parse_chat_completion(body).expect("parsed"), "approved");
    }

    #[test]
    fn keeps_content_formatting_intact() {
        let body = r#"{"choices":[{"message":{"content":"    def f():\n        pass\n"}}]}"#;
        assert_eq!(
            parse_chat_completion(body).expect("parsed"),
            "    def f():\n        pass\n"
        );
    }

    #[test]
    fn malformed_bodies_are_parse_failures() {
        for body in [
            "not json",
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{"role":"assistant"}}]}"#,
        ] {
            assert!(
                matches!(
                    parse_chat_completion(body),
                    Err(ProviderError::ParseFailure { .. })
                ),
                "body should fail: {body}"
            );
        }
    }

    #[test]
    fn blank_content_is_an_empty_completion() {
        let body = r#"{"choices":[{"message":{"content":"  \n "}}]}"#;
        assert_eq!(
            parse_chat_completion(body),
            Err(ProviderError::EmptyCompletion)
        );
    }
}
