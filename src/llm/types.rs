use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Default output token budget for a plain generation call.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2000;

/// Supported text-generation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    OpenAI,
    DeepSeek,
    HuggingFace,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Gemini,
        ProviderKind::OpenAI,
        ProviderKind::DeepSeek,
        ProviderKind::HuggingFace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAI => "openai",
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::HuggingFace => "huggingface",
        }
    }

    /// Environment variable holding this provider's credential.
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenAI => "OPENAI_API_KEY",
            ProviderKind::DeepSeek => "DEEPSEEK_API_KEY",
            ProviderKind::HuggingFace => "HUGGINGFACE_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            ProviderKind::OpenAI => "https://api.openai.com/v1",
            ProviderKind::DeepSeek => "https://api.deepseek.com/v1",
            ProviderKind::HuggingFace => "https://api-inference.huggingface.co",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-2.0-flash",
            ProviderKind::OpenAI => "gpt-3.5-turbo",
            ProviderKind::DeepSeek => "deepseek-chat",
            ProviderKind::HuggingFace => "meta-llama/Llama-3.2-3B-Instruct",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name and priority of one registered provider. Lower priority is tried first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    pub name: String,
    pub priority: u32,
}

impl ProviderDescriptor {
    pub fn new(name: impl Into<String>, priority: u32) -> Self {
        Self {
            name: name.into(),
            priority,
        }
    }
}

/// A single text-generation request handed to the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub id: Uuid,
    pub prompt: String,
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, max_output_tokens: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: prompt.into(),
            max_output_tokens: max_output_tokens.max(1),
        }
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: String::new(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Successful output of one orchestrator invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub request_id: Uuid,
    pub text: String,
    pub provider_name: String,
    pub succeeded: bool,
    pub generated_at: DateTime<Utc>,
    pub elapsed: Duration,
}

/// One provider's failure inside a single orchestrator invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub provider_name: String,
    pub message: String,
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider_name, self.message)
    }
}

/// Errors raised by a single provider adapter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Configuration error: {env_var} not found")]
    Configuration { env_var: String },
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Response format error: {0}")]
    ResponseFormat(String),
}

impl ProviderError {
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::Configuration { .. } => "ConfigurationError",
            ProviderError::Transport(_) => "TransportError",
            ProviderError::ResponseFormat(_) => "ResponseFormatError",
        }
    }
}

/// The only error that `FallbackOrchestrator::generate` can return
#[derive(Debug, Clone, thiserror::Error)]
pub enum FallbackError {
    #[error("All providers failed. Errors: {}", join_failures(.failures))]
    AllProvidersFailed { failures: Vec<FailureRecord> },
}

impl FallbackError {
    pub fn failures(&self) -> &[FailureRecord] {
        match self {
            FallbackError::AllProvidersFailed { failures } => failures,
        }
    }
}

fn join_failures(failures: &[FailureRecord]) -> String {
    failures
        .iter()
        .map(|record| record.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
