//! Priority-ordered dispatch across provider adapters.
//!
//! [`FallbackOrchestrator`] tries each registered adapter in ascending priority
//! and stops at the first success. Adapter errors never escape individually:
//! they are folded into a single [`FallbackError::AllProvidersFailed`] that
//! lists every attempt in order.

use crate::llm::provider::ProviderAdapter;
use crate::llm::types::{
    DEFAULT_MAX_OUTPUT_TOKENS, FailureRecord, FallbackError, GenerationRequest, GenerationResult,
    ProviderDescriptor,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Provider '{0}' is already registered")]
    DuplicateProvider(String),
}

/// Builder collecting providers before the order is frozen
#[derive(Default)]
pub struct FallbackOrchestratorBuilder {
    descriptors: Vec<ProviderDescriptor>,
    adapters: HashMap<String, Arc<dyn ProviderAdapter>>,
}

impl FallbackOrchestratorBuilder {
    /// Register `adapter` under its own provider name.
    pub fn register(
        mut self,
        priority: u32,
        adapter: Arc<dyn ProviderAdapter>,
    ) -> Result<Self, RegistrationError> {
        let name = adapter.provider_name().to_string();
        if self.adapters.contains_key(&name) {
            return Err(RegistrationError::DuplicateProvider(name));
        }

        self.descriptors
            .push(ProviderDescriptor::new(name.clone(), priority));
        self.adapters.insert(name, adapter);
        Ok(self)
    }

    pub fn build(mut self) -> FallbackOrchestrator {
        // Stable: equal priorities keep registration order.
        self.descriptors.sort_by_key(|descriptor| descriptor.priority);

        FallbackOrchestrator {
            descriptors: self.descriptors,
            adapters: self.adapters,
        }
    }
}

/// Tries providers in priority order until one produces text.
///
/// The provider list is fixed at construction; share the orchestrator behind
/// an `Arc` rather than rebuilding it per request.
pub struct FallbackOrchestrator {
    descriptors: Vec<ProviderDescriptor>,
    adapters: HashMap<String, Arc<dyn ProviderAdapter>>,
}

impl std::fmt::Debug for FallbackOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackOrchestrator")
            .field("descriptors", &self.descriptors)
            .field("adapters", &self.adapters.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FallbackOrchestrator {
    pub fn builder() -> FallbackOrchestratorBuilder {
        FallbackOrchestratorBuilder::default()
    }

    /// Descriptors in the order they will be attempted
    pub fn providers(&self) -> &[ProviderDescriptor] {
        &self.descriptors
    }

    /// Generate text from the first provider that succeeds.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, FallbackError> {
        let started = Instant::now();
        let mut failures = Vec::new();

        for descriptor in &self.descriptors {
            let Some(adapter) = self.adapters.get(&descriptor.name) else {
                continue;
            };

            debug!(
                request_id = %request.id,
                provider = %descriptor.name,
                priority = descriptor.priority,
                "Trying provider"
            );

            match adapter.generate(request).await {
                Ok(text) => {
                    info!(
                        request_id = %request.id,
                        provider = %descriptor.name,
                        attempts = failures.len() + 1,
                        "Generation succeeded"
                    );
                    return Ok(GenerationResult {
                        request_id: request.id,
                        text,
                        provider_name: descriptor.name.clone(),
                        succeeded: true,
                        generated_at: Utc::now(),
                        elapsed: started.elapsed(),
                    });
                }
                Err(error) => {
                    warn!(
                        request_id = %request.id,
                        provider = %descriptor.name,
                        kind = error.kind(),
                        "Provider failed: {}",
                        error
                    );
                    failures.push(FailureRecord {
                        provider_name: descriptor.name.clone(),
                        message: error.to_string(),
                    });
                }
            }
        }

        Err(FallbackError::AllProvidersFailed { failures })
    }

    /// Convenience wrapper building the request from a prompt and token budget.
    pub async fn generate_text(
        &self,
        prompt: &str,
        max_output_tokens: Option<u32>,
    ) -> Result<GenerationResult, FallbackError> {
        let request = GenerationRequest::new(
            prompt,
            max_output_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
        );
        self.generate(&request).await
    }
}
