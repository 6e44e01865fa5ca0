//! # PromptX
//!
//! Prompt generation, enhancement and quality scoring across several hosted
//! LLM providers, with ordered automatic fallback between them.
//!
//! ## Architecture Overview
//!
//! - **[`llm`]**: Provider adapters (Gemini, OpenAI, DeepSeek, Hugging Face) and the fallback orchestrator
//! - **[`quality`]**: Deterministic heuristic scoring and keyword classification
//! - **[`variations`]**: Concise/detailed/structured rewrites and best-variation selection
//! - **[`enhance`]**: Master-prompt rewriting with before/after scoring
//! - **[`integration`]**: Configuration and the system handle tying everything together
//!
//! ## Features
//!
//! ### 🔁 Provider Fallback
//! - **Priority Order**: Providers are tried in ascending priority, ties in registration order
//! - **First Success Wins**: No further provider is contacted once one succeeds
//! - **Aggregated Failures**: Every per-provider failure is reported in attempted order
//!
//! ### 📊 Prompt Quality
//! - **Heatmap**: Six scored dimensions, an overall grade and improvement suggestions
//! - **Summary**: Total score, percentage and quality label
//! - **Classification**: Category and intent detection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use promptx::{Credentials, PromptxConfig, PromptxSystem};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = PromptxConfig::default();
//!     let system = PromptxSystem::new(&config, &Credentials::from_env(&config))?;
//!
//!     let comparison = system.compare_variations("Write a blog post about cats").await;
//!     println!("{}", comparison.reason);
//!     Ok(())
//! }
//! ```

/// Provider-agnostic LLM interface.
///
/// One adapter type per hosted provider behind a common trait, plus the
/// priority-ordered fallback orchestrator.
pub mod llm;

/// Heuristic prompt scoring and classification.
pub mod quality;

/// Prompt variations and comparison.
pub mod variations;

/// Master-prompt enhancement.
pub mod enhance;

/// High-level system integration.
///
/// Configuration loading, credential lookup and orchestrator construction.
pub mod integration;

/// Environment constants and path utilities.
///
/// Centralizes configuration file names and discovery locations.
pub mod env;

// Re-export LLM abstraction types
pub use llm::{
    FallbackError, FallbackOrchestrator, GenerationRequest, GenerationResult, ProviderAdapter,
    ProviderError, ProviderKind,
};

// Re-export quality types
pub use quality::{PromptClassifier, QualityReport, QualityScorer};

// Re-export variation types
pub use variations::{ComparisonResult, VariationComparator, VariationGenerator, VariationLabel};

pub use enhance::{EnhanceError, EnhancementReport, Enhancer};

// Re-export integration types
pub use integration::{Credentials, GenerateError, PromptxConfig, PromptxSystem};

// CLI module for command-line interface
pub mod cli;
