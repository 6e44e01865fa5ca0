//! Master-prompt enhancement pipeline.
//!
//! Classifies and scores the user's prompt, asks the orchestrator to rewrite it
//! under a fixed prompt-engineering instruction, then scores the rewrite so the
//! caller can see the improvement.

use crate::llm::{FallbackError, FallbackOrchestrator, GenerationRequest};
use crate::quality::scorer::round_to;
use crate::quality::{Classification, PromptClassifier, QualityScorer, ScoreSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub const MASTER_PROMPT: &str = "You are a world-class senior prompt engineer with expertise in AI instruction optimization.

Transform the user's prompt into a professional, structured, high-performance prompt by improving:
1. Clarity – Remove ambiguity
2. Specificity – Add measurable detail
3. Context – Add reasonable background if missing
4. Constraints – Add boundaries (length, tone, depth, scope)
5. Structure – Add clear formatting instructions
6. Output formatting – Specify format explicitly
7. Professional framing – Add role assignment

Rules:
- Do NOT ask follow-up questions
- Infer missing details intelligently
- Do NOT explain your reasoning
- Return ONLY the improved prompt
- Maintain user's original intent
- Do not make it excessively verbose unless needed
- Use emojis strategically for visual appeal
- Structure with clear sections using headers and bullet points
- Make it visually scannable and professional";

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error(transparent)]
    Generation(#[from] FallbackError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    pub max_prompt_chars: usize,
    pub max_output_tokens: u32,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            max_prompt_chars: 5000,
            max_output_tokens: 2000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhancementReport {
    pub original: String,
    pub enhanced: String,
    pub classification: Classification,
    pub original_score: ScoreSummary,
    pub enhanced_score: ScoreSummary,
    pub improvement: f64,
    pub provider_name: String,
    pub generated_at: DateTime<Utc>,
}

pub struct Enhancer {
    orchestrator: Arc<FallbackOrchestrator>,
    classifier: PromptClassifier,
    scorer: QualityScorer,
    config: EnhanceConfig,
}

impl Enhancer {
    pub fn new(orchestrator: Arc<FallbackOrchestrator>, config: EnhanceConfig) -> Self {
        Self {
            orchestrator,
            classifier: PromptClassifier::new(),
            scorer: QualityScorer::new(),
            config,
        }
    }

    pub fn build_prompt(prompt: &str) -> String {
        format!("{}\n\nUser prompt to enhance:\n{}", MASTER_PROMPT, prompt)
    }

    pub async fn enhance(&self, prompt: &str) -> Result<EnhancementReport, EnhanceError> {
        let prompt = self.validate(prompt)?;

        let classification = self.classifier.classify(prompt);
        let original_score = self.scorer.summarize(prompt);

        let request = GenerationRequest::new(Self::build_prompt(prompt), self.config.max_output_tokens);
        let result = self.orchestrator.generate(&request).await?;

        let enhanced_score = self.scorer.summarize(&result.text);
        let improvement = round_to(enhanced_score.total - original_score.total, 2);

        info!(
            category = %classification.category,
            provider = %result.provider_name,
            improvement,
            "Prompt enhanced"
        );

        Ok(EnhancementReport {
            original: prompt.to_string(),
            enhanced: result.text,
            classification,
            original_score,
            enhanced_score,
            improvement,
            provider_name: result.provider_name,
            generated_at: result.generated_at,
        })
    }

    fn validate<'p>(&self, prompt: &'p str) -> Result<&'p str, EnhanceError> {
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            return Err(EnhanceError::InvalidPrompt("prompt is empty".to_string()));
        }

        let length = trimmed.chars().count();
        if length > self.config.max_prompt_chars {
            return Err(EnhanceError::InvalidPrompt(format!(
                "prompt is {} characters, limit is {}",
                length, self.config.max_prompt_chars
            )));
        }
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ProviderAdapter, ProviderError};
    use futures::future::BoxFuture;

    struct FixedAdapter(Result<String, ProviderError>);

    impl ProviderAdapter for FixedAdapter {
        fn generate<'a>(
            &'a self,
            request: &'a GenerationRequest,
        ) -> BoxFuture<'a, Result<String, ProviderError>> {
            assert!(request.prompt.starts_with(MASTER_PROMPT));
            assert_eq!(request.max_output_tokens, 2000);
            let outcome = self.0.clone();
            Box::pin(async move { outcome })
        }

        fn provider_name(&self) -> &str {
            "fixed"
        }
    }

    fn enhancer(outcome: Result<String, ProviderError>) -> Enhancer {
        let orchestrator = FallbackOrchestrator::builder()
            .register(1, Arc::new(FixedAdapter(outcome)))
            .unwrap()
            .build();
        Enhancer::new(Arc::new(orchestrator), EnhanceConfig::default())
    }

    #[tokio::test]
    async fn test_enhance_reports_improvement() {
        let enhanced = "Role: technical writer.\nWrite a detailed blog post about cats for a general audience. \
                        Tone: friendly. Format: markdown with three sections. Length: 500 words. \
                        You must avoid jargon.";
        let report = enhancer(Ok(enhanced.to_string()))
            .enhance("  write about cats  ")
            .await
            .unwrap();

        assert_eq!(report.original, "write about cats");
        assert_eq!(report.provider_name, "fixed");
        assert_eq!(report.classification.category, "general");
        assert_eq!(report.original_score.total, 1.0);
        assert_eq!(report.enhanced_score.total, 8.0);
        assert_eq!(report.improvement, 7.0);
    }

    #[test]
    fn test_master_prompt_carries_every_rule() {
        let rules: Vec<&str> = MASTER_PROMPT
            .lines()
            .skip_while(|line| *line != "Rules:")
            .skip(1)
            .collect();

        assert_eq!(rules.len(), 9);
        assert!(rules.contains(&"- Use emojis strategically for visual appeal"));
        assert_eq!(rules.last(), Some(&"- Make it visually scannable and professional"));

        let built = Enhancer::build_prompt("write about cats");
        assert!(built.ends_with("\n\nUser prompt to enhance:\nwrite about cats"));
    }

    #[tokio::test]
    async fn test_rejects_empty_and_oversized_prompts() {
        let enhancer = enhancer(Ok("unused".to_string()));

        assert!(matches!(
            enhancer.enhance("   ").await,
            Err(EnhanceError::InvalidPrompt(_))
        ));
        assert!(matches!(
            enhancer.enhance(&"x".repeat(5001)).await,
            Err(EnhanceError::InvalidPrompt(_))
        ));
    }

    #[tokio::test]
    async fn test_generation_failure_surfaces_aggregate() {
        let error = enhancer(Err(ProviderError::Transport("HTTP 500: down".to_string())))
            .enhance("write about cats")
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "All providers failed. Errors: fixed: Transport error: HTTP 500: down"
        );
    }
}
