pub mod client;
pub mod output_parse;
pub mod types;

pub use client::ChatCompletionsClient;
pub use output_parse::parse_chat_completion;
pub use types::ProviderError;

/// One round trip to a hosted text-completion model. No retries happen here;
/// callers decide what a failure means.
pub trait CompletionClient: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

impl<T: CompletionClient + ?Sized> CompletionClient for std::sync::Arc<T> {
    fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        (**self).complete(prompt)
    }
}

impl<T: CompletionClient + ?Sized> CompletionClient for &T {
    fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        (**self).complete(prompt)
    }
}
