//! # System Wiring
//!
//! Builds the provider adapters and the fallback orchestrator from
//! configuration, then exposes every prompt operation through one handle.
//!
//! ## Core Components
//!
//! - **[`PromptxSystem`]**: owns the orchestrator and the scoring/variation/enhancement services
//! - **[`PromptxConfig`]**: unified, TOML-serializable configuration
//! - **[`Credentials`]**: provider API keys, read once from the environment
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use promptx::{Credentials, PromptxConfig, PromptxSystem};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = PromptxConfig::default();
//!     let credentials = Credentials::from_env(&config);
//!     let system = PromptxSystem::new(&config, &credentials)?;
//!
//!     let result = system.generate("Write a haiku about Rust", None).await?;
//!     println!("{} (via {})", result.text, result.provider_name);
//!
//!     let report = system.score("Summarize this article");
//!     println!("grade {}", report.grade);
//!     Ok(())
//! }
//! ```

use crate::enhance::{EnhanceConfig, EnhanceError, EnhancementReport, Enhancer};
use crate::llm::transport::{self, DEFAULT_TIMEOUT};
use crate::llm::{
    AdapterSettings, FallbackError, FallbackOrchestrator, GenerationResult, ProviderAdapterFactory,
    ProviderKind,
};
use crate::quality::{Classification, IntentReport, PromptClassifier, QualityReport, QualityScorer, ScoreSummary};
use crate::variations::{ComparisonResult, VariationComparator, VariationConfig, VariationGenerator, VariationSet};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use url::Url;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error(transparent)]
    Generation(#[from] FallbackError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bound on each outbound provider call
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// One provider in the fallback chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderEntry {
    pub kind: ProviderKind,
    /// Registration name; defaults to the kind's name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub priority: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Environment variable holding the credential; defaults per kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

impl ProviderEntry {
    pub fn new(kind: ProviderKind, priority: u32) -> Self {
        Self {
            kind,
            name: None,
            priority,
            model: None,
            base_url: None,
            api_key_env: None,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.kind.as_str())
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or(self.kind.api_key_env_var())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptxConfig {
    pub http: HttpConfig,
    pub providers: Vec<ProviderEntry>,
    pub variations: VariationConfig,
    pub enhance: EnhanceConfig,
}

impl Default for PromptxConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            providers: ProviderKind::ALL
                .iter()
                .zip(1..)
                .map(|(kind, priority)| ProviderEntry::new(*kind, priority))
                .collect(),
            variations: VariationConfig::default(),
            enhance: EnhanceConfig::default(),
        }
    }
}

impl PromptxConfig {
    /// Load configuration from a TOML file
    pub fn from_toml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Save configuration to a TOML file
    pub fn to_toml_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content).context("Failed to write config file")
    }

    /// Convert configuration to a TOML string
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Create one adapter per entry and register them with a new orchestrator.
    pub fn build_orchestrator(&self, credentials: &Credentials) -> Result<FallbackOrchestrator> {
        let client = transport::build_client(Duration::from_secs(self.http.timeout_secs))
            .context("Failed to build HTTP client")?;

        let mut builder = FallbackOrchestrator::builder();
        for entry in &self.providers {
            let api_key = credentials.get(entry.api_key_env()).map(str::to_string);
            let mut settings = AdapterSettings::defaults(entry.kind, api_key, client.clone())
                .context("Invalid built-in base_url")?;

            settings.name = entry.name().to_string();
            settings.api_key_env = entry.api_key_env().to_string();
            if let Some(model) = &entry.model {
                settings.model = model.clone();
            }
            if let Some(base_url) = &entry.base_url {
                settings.base_url = Url::parse(base_url)
                    .with_context(|| format!("Invalid base_url for provider '{}'", entry.name()))?;
            }

            builder = builder.register(entry.priority, ProviderAdapterFactory::create_adapter(settings))?;
        }

        Ok(builder.build())
    }
}

/// Provider API keys keyed by environment variable name
#[derive(Clone, Default)]
pub struct Credentials {
    keys: HashMap<String, String>,
}

impl Credentials {
    /// Read the credential variable of every configured provider.
    pub fn from_env(config: &PromptxConfig) -> Self {
        Self::from_lookup(config, |var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(config: &PromptxConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let keys = config
            .providers
            .iter()
            .filter_map(|entry| {
                let var = entry.api_key_env();
                lookup(var)
                    .filter(|value| !value.trim().is_empty())
                    .map(|value| (var.to_string(), value))
            })
            .collect();
        Self { keys }
    }

    pub fn with_key(mut self, env_var: impl Into<String>, value: impl Into<String>) -> Self {
        self.keys.insert(env_var.into(), value.into());
        self
    }

    pub fn get(&self, env_var: &str) -> Option<&str> {
        self.keys.get(env_var).map(String::as_str)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.keys.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Credentials").field("present", &names).finish()
    }
}

/// Every prompt operation behind a single handle
pub struct PromptxSystem {
    orchestrator: Arc<FallbackOrchestrator>,
    scorer: QualityScorer,
    classifier: PromptClassifier,
    generator: VariationGenerator,
    comparator: VariationComparator,
    enhancer: Enhancer,
}

impl PromptxSystem {
    pub fn new(config: &PromptxConfig, credentials: &Credentials) -> Result<Self> {
        let orchestrator = Arc::new(config.build_orchestrator(credentials)?);

        let order: Vec<&str> = orchestrator
            .providers()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        info!(providers = ?order, "Provider fallback order initialized");

        Ok(Self::with_orchestrator(orchestrator, config))
    }

    /// Assemble the services around an existing orchestrator.
    pub fn with_orchestrator(orchestrator: Arc<FallbackOrchestrator>, config: &PromptxConfig) -> Self {
        let scorer = QualityScorer::new();
        Self {
            generator: VariationGenerator::new(orchestrator.clone(), config.variations.clone()),
            enhancer: Enhancer::new(orchestrator.clone(), config.enhance.clone()),
            comparator: VariationComparator::new(scorer),
            classifier: PromptClassifier::new(),
            scorer,
            orchestrator,
        }
    }

    pub fn orchestrator(&self) -> &Arc<FallbackOrchestrator> {
        &self.orchestrator
    }

    /// Generate text for the trimmed prompt; blank prompts never reach a provider.
    pub async fn generate(
        &self,
        prompt: &str,
        max_output_tokens: Option<u32>,
    ) -> Result<GenerationResult, GenerateError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerateError::InvalidPrompt("prompt is empty".to_string()));
        }
        Ok(self.orchestrator.generate_text(prompt, max_output_tokens).await?)
    }

    pub fn score(&self, text: &str) -> QualityReport {
        self.scorer.score(text.trim())
    }

    pub fn summarize(&self, text: &str) -> ScoreSummary {
        self.scorer.summarize(text.trim())
    }

    pub fn classify(&self, prompt: &str) -> Classification {
        self.classifier.classify(prompt.trim())
    }

    pub fn detect_intent(&self, prompt: &str) -> IntentReport {
        self.classifier.detect_intent(prompt.trim())
    }

    pub async fn enhance(&self, prompt: &str) -> Result<EnhancementReport, EnhanceError> {
        self.enhancer.enhance(prompt).await
    }

    /// Always succeeds; labels may be degraded to the original prompt.
    pub async fn generate_variations(&self, prompt: &str) -> VariationSet {
        self.generator.generate_variations(prompt.trim()).await
    }

    pub async fn compare_variations(&self, prompt: &str) -> ComparisonResult {
        let prompt = prompt.trim();
        let variations = self.generator.generate_variations(prompt).await;
        self.comparator.compare(prompt, variations)
    }
}
