use crate::llm::openai_provider::chat_completion;
use crate::llm::provider::{AdapterSettings, ProviderAdapter};
use crate::llm::types::{GenerationRequest, ProviderError};
use futures::future::BoxFuture;

/// DeepSeek implementation of [`ProviderAdapter`].
///
/// DeepSeek exposes an OpenAI-compatible chat-completions endpoint, so the
/// wire format is shared with [`OpenAIProvider`](crate::llm::OpenAIProvider).
pub struct DeepSeekProvider {
    settings: AdapterSettings,
}

impl DeepSeekProvider {
    pub fn new(settings: AdapterSettings) -> Self {
        Self { settings }
    }
}

impl ProviderAdapter for DeepSeekProvider {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<String, ProviderError>> {
        Box::pin(chat_completion(&self.settings, request))
    }

    fn provider_name(&self) -> &str {
        &self.settings.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::ProviderKind;

    #[tokio::test]
    async fn test_missing_key_names_deepseek_variable() {
        let settings =
            AdapterSettings::defaults(ProviderKind::DeepSeek, None, reqwest::Client::new())
                .unwrap();
        assert_eq!(settings.endpoint("chat/completions"), "https://api.deepseek.com/v1/chat/completions");

        let provider = DeepSeekProvider::new(settings);
        let error = provider
            .generate(&GenerationRequest::new("hello", 10))
            .await
            .unwrap_err();

        assert_eq!(
            error,
            ProviderError::Configuration {
                env_var: "DEEPSEEK_API_KEY".to_string()
            }
        );
    }
}
