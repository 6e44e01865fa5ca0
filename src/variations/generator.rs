use crate::llm::{FallbackError, FallbackOrchestrator, GenerationRequest, GenerationResult};
use crate::variations::types::{Variation, VariationLabel, VariationPolicy, VariationSet};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationConfig {
    pub policy: VariationPolicy,
    /// Issue the three generation calls concurrently instead of one after another.
    pub parallel: bool,
}

/// Produces concise, detailed and structured rewrites of a prompt.
///
/// Never fails: a label whose generation fails carries the original prompt
/// with `degraded = true` (see [`VariationPolicy`]).
pub struct VariationGenerator {
    orchestrator: Arc<FallbackOrchestrator>,
    config: VariationConfig,
}

impl VariationGenerator {
    pub fn new(orchestrator: Arc<FallbackOrchestrator>, config: VariationConfig) -> Self {
        Self {
            orchestrator,
            config,
        }
    }

    pub async fn generate_variations(&self, prompt: &str) -> VariationSet {
        let outcomes = if self.config.parallel {
            join_all(
                VariationLabel::ALL
                    .iter()
                    .map(|label| self.generate_one(*label, prompt)),
            )
            .await
        } else {
            let stop_on_failure = self.config.policy == VariationPolicy::AllOrNothing;
            let mut outcomes = Vec::with_capacity(VariationLabel::ALL.len());
            for label in VariationLabel::ALL {
                let outcome = self.generate_one(label, prompt).await;
                let failed = outcome.1.is_err();
                outcomes.push(outcome);
                // Remaining outcomes would be discarded
                if failed && stop_on_failure {
                    break;
                }
            }
            outcomes
        };

        let any_failed = outcomes.iter().any(|(_, outcome)| outcome.is_err());
        if any_failed && self.config.policy == VariationPolicy::AllOrNothing {
            warn!("Variation generation failed; returning original prompt for every label");
            return VariationLabel::ALL
                .iter()
                .map(|label| (*label, Variation::fallback(*label, prompt)))
                .collect();
        }

        outcomes
            .into_iter()
            .map(|(label, outcome)| {
                let variation = match outcome {
                    Ok(result) => Variation::generated(label, result.text, result.provider_name),
                    Err(error) => {
                        warn!(label = %label, "Variation degraded to original prompt: {}", error);
                        Variation::fallback(label, prompt)
                    }
                };
                (label, variation)
            })
            .collect()
    }

    async fn generate_one(
        &self,
        label: VariationLabel,
        prompt: &str,
    ) -> (VariationLabel, Result<GenerationResult, FallbackError>) {
        let request = GenerationRequest::new(label.render_prompt(prompt), label.max_output_tokens());
        let outcome = self.orchestrator.generate(&request).await;

        if let Ok(result) = &outcome {
            info!(label = %label, provider = %result.provider_name, "Variation generated");
        }
        (label, outcome)
    }
}
