use futures::future::BoxFuture;
use promptx::integration::ProviderEntry;
use promptx::llm::{FallbackOrchestrator, GenerationRequest, ProviderAdapter, ProviderError};
use promptx::{
    Credentials, FallbackError, GenerateError, ProviderKind, PromptxConfig, PromptxSystem,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Adapter with a fixed outcome that counts how often it was invoked
struct CountingAdapter {
    name: String,
    outcome: Result<String, ProviderError>,
    calls: AtomicUsize,
}

impl CountingAdapter {
    fn new(name: &str, outcome: Result<String, ProviderError>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ProviderAdapter for CountingAdapter {
    fn generate<'a>(
        &'a self,
        _request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<String, ProviderError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }

    fn provider_name(&self) -> &str {
        &self.name
    }
}

fn fallback_error(error: GenerateError) -> FallbackError {
    match error {
        GenerateError::Generation(error) => error,
        other => panic!("Expected a provider failure, got {}", other),
    }
}

#[tokio::test]
async fn test_all_credentials_absent_reports_every_provider() {
    let config = PromptxConfig::default();
    let system = PromptxSystem::new(&config, &Credentials::default())
        .expect("Default configuration should build");

    let error = system
        .generate("Write a haiku", None)
        .await
        .map_err(fallback_error)
        .expect_err("Every provider lacks a credential");

    let failures = error.failures();
    let names: Vec<&str> = failures.iter().map(|f| f.provider_name.as_str()).collect();
    assert_eq!(names, vec!["gemini", "openai", "deepseek", "huggingface"]);

    for (failure, kind) in failures.iter().zip(ProviderKind::ALL) {
        assert_eq!(
            failure.message,
            format!("Configuration error: {} not found", kind.api_key_env_var())
        );
    }

    assert_eq!(
        error.to_string(),
        "All providers failed. Errors: \
         gemini: Configuration error: GEMINI_API_KEY not found; \
         openai: Configuration error: OPENAI_API_KEY not found; \
         deepseek: Configuration error: DEEPSEEK_API_KEY not found; \
         huggingface: Configuration error: HUGGINGFACE_API_KEY not found"
    );
}

#[tokio::test]
async fn test_first_success_stops_the_chain() {
    let first = CountingAdapter::new("gemini", Ok("from gemini".to_string()));
    let second = CountingAdapter::new("openai", Ok("from openai".to_string()));
    let third = CountingAdapter::new("deepseek", Ok("from deepseek".to_string()));
    let fourth = CountingAdapter::new("huggingface", Ok("from huggingface".to_string()));

    let orchestrator = FallbackOrchestrator::builder()
        .register(4, fourth.clone())
        .and_then(|b| b.register(1, first.clone()))
        .and_then(|b| b.register(3, third.clone()))
        .and_then(|b| b.register(2, second.clone()))
        .expect("Names are unique")
        .build();

    let result = orchestrator
        .generate_text("hello", Some(100))
        .await
        .expect("First provider succeeds");

    assert_eq!(result.provider_name, "gemini");
    assert_eq!(result.text, "from gemini");
    assert!(result.succeeded);
    assert_eq!(first.calls(), 1);
    assert_eq!(second.calls(), 0);
    assert_eq!(third.calls(), 0);
    assert_eq!(fourth.calls(), 0);
}

#[tokio::test]
async fn test_falls_through_to_later_provider() {
    let first = CountingAdapter::new(
        "gemini",
        Err(ProviderError::Transport("HTTP 503: overloaded".to_string())),
    );
    let second = CountingAdapter::new(
        "openai",
        Err(ProviderError::ResponseFormat("empty choices".to_string())),
    );
    let third = CountingAdapter::new("deepseek", Ok("deepseek answer".to_string()));
    let fourth = CountingAdapter::new("huggingface", Ok("unused".to_string()));

    let orchestrator = FallbackOrchestrator::builder()
        .register(1, first.clone())
        .and_then(|b| b.register(2, second.clone()))
        .and_then(|b| b.register(3, third.clone()))
        .and_then(|b| b.register(4, fourth.clone()))
        .expect("Names are unique")
        .build();

    let result = orchestrator
        .generate(&GenerationRequest::new("hello", 50))
        .await
        .expect("Third provider succeeds");

    assert_eq!(result.provider_name, "deepseek");
    assert_eq!(first.calls(), 1);
    assert_eq!(second.calls(), 1);
    assert_eq!(third.calls(), 1);
    assert_eq!(fourth.calls(), 0);
}

#[tokio::test]
async fn test_unreachable_provider_is_a_transport_failure() {
    let mut openai = ProviderEntry::new(ProviderKind::OpenAI, 1);
    // Nothing listens on the discard port
    openai.base_url = Some("http://127.0.0.1:9/v1".to_string());

    let config = PromptxConfig {
        providers: vec![openai, ProviderEntry::new(ProviderKind::DeepSeek, 2)],
        ..PromptxConfig::default()
    };
    let credentials = Credentials::default().with_key("OPENAI_API_KEY", "sk-test");
    let system = PromptxSystem::new(&config, &credentials).expect("Configuration is valid");

    let error = system
        .generate("hello", Some(10))
        .await
        .map_err(fallback_error)
        .expect_err("No provider can succeed");

    let failures = error.failures();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].provider_name, "openai");
    assert!(
        failures[0].message.starts_with("Transport error:"),
        "unexpected message: {}",
        failures[0].message
    );
    assert_eq!(
        failures[1].message,
        "Configuration error: DEEPSEEK_API_KEY not found"
    );
}
