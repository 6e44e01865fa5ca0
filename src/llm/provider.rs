use crate::llm::types::{GenerationRequest, ProviderError, ProviderKind};
use futures::future::BoxFuture;
use std::sync::Arc;
use url::Url;

/// Capability shared by every text-generation backend.
///
/// Implementations issue at most one outbound call per `generate` and never
/// retry; fallback across providers belongs to
/// [`FallbackOrchestrator`](crate::llm::FallbackOrchestrator).
pub trait ProviderAdapter: Send + Sync {
    /// Generate text for `request`.
    ///
    /// Returned text is trimmed and never empty. A missing credential fails
    /// with [`ProviderError::Configuration`] before any network activity.
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<String, ProviderError>>;

    /// Name this adapter is registered under
    fn provider_name(&self) -> &str;
}

/// Everything an adapter needs to reach its provider
#[derive(Clone)]
pub struct AdapterSettings {
    pub name: String,
    pub kind: ProviderKind,
    pub model: String,
    pub base_url: Url,
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub client: reqwest::Client,
}

impl AdapterSettings {
    /// Settings pointing at the provider's public endpoint with its default model.
    pub fn defaults(
        kind: ProviderKind,
        api_key: Option<String>,
        client: reqwest::Client,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            name: kind.as_str().to_string(),
            kind,
            model: kind.default_model().to_string(),
            base_url: Url::parse(kind.default_base_url())?,
            api_key,
            api_key_env: kind.api_key_env_var().to_string(),
            client,
        })
    }

    /// Join `path` onto the configured base URL.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// The configured credential, or a configuration error naming its variable.
    pub(crate) fn require_api_key(&self) -> Result<&str, ProviderError> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ProviderError::Configuration {
                env_var: self.api_key_env.clone(),
            }),
        }
    }
}

/// Factory for creating provider adapters
pub struct ProviderAdapterFactory;

impl ProviderAdapterFactory {
    pub fn create_adapter(settings: AdapterSettings) -> Arc<dyn ProviderAdapter> {
        match settings.kind {
            ProviderKind::Gemini => Arc::new(crate::llm::gemini_provider::GeminiProvider::new(
                settings,
            )),
            ProviderKind::OpenAI => Arc::new(crate::llm::openai_provider::OpenAIProvider::new(
                settings,
            )),
            ProviderKind::DeepSeek => Arc::new(
                crate::llm::deepseek_provider::DeepSeekProvider::new(settings),
            ),
            ProviderKind::HuggingFace => Arc::new(
                crate::llm::huggingface_provider::HuggingFaceProvider::new(settings),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base: &str) -> AdapterSettings {
        let mut settings =
            AdapterSettings::defaults(ProviderKind::OpenAI, None, reqwest::Client::new()).unwrap();
        settings.base_url = Url::parse(base).unwrap();
        settings
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        assert_eq!(
            settings("https://api.example.com/v1/").endpoint("/chat/completions"),
            "https://api.example.com/v1/chat/completions"
        );
        assert_eq!(
            settings("https://api.example.com/v1").endpoint("chat/completions"),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_blank_api_key_is_a_configuration_error() {
        let mut settings = settings("https://api.example.com/v1");
        settings.api_key = Some("   ".to_string());

        assert_eq!(
            settings.require_api_key(),
            Err(ProviderError::Configuration {
                env_var: "OPENAI_API_KEY".to_string()
            })
        );
    }

    #[test]
    fn test_factory_names_adapters_after_settings() {
        for kind in ProviderKind::ALL {
            let settings = AdapterSettings::defaults(kind, None, reqwest::Client::new()).unwrap();
            let adapter = ProviderAdapterFactory::create_adapter(settings);
            assert_eq!(adapter.provider_name(), kind.as_str());
        }
    }
}
