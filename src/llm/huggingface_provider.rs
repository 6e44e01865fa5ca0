use crate::llm::provider::{AdapterSettings, ProviderAdapter};
use crate::llm::transport::{self, AuthScheme};
use crate::llm::types::{GenerationRequest, ProviderError};
use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::{Value, json};

/// The inference API answers with either a list of generations or a single object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Many(Vec<Generation>),
    One(Generation),
}

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(default)]
    generated_text: Option<String>,
}

/// Hugging Face Inference API implementation of [`ProviderAdapter`]
pub struct HuggingFaceProvider {
    settings: AdapterSettings,
}

impl HuggingFaceProvider {
    pub fn new(settings: AdapterSettings) -> Self {
        Self { settings }
    }

    fn request_body(request: &GenerationRequest) -> Value {
        json!({
            "inputs": request.prompt,
            "parameters": {
                "max_new_tokens": request.max_output_tokens,
                "return_full_text": false,
            },
        })
    }

    fn extract_text(body: Value) -> Result<String, ProviderError> {
        let response: InferenceResponse = serde_json::from_value(body).map_err(|e| {
            ProviderError::ResponseFormat(format!("unexpected response shape: {}", e))
        })?;

        let generation = match response {
            InferenceResponse::Many(list) => list.into_iter().next(),
            InferenceResponse::One(single) => Some(single),
        };

        let text = generation
            .and_then(|g| g.generated_text)
            .ok_or_else(|| ProviderError::ResponseFormat("missing generated_text".to_string()))?;

        transport::non_empty_text(&text)
    }

    async fn call(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let api_key = self.settings.require_api_key()?;
        let url = self.settings.endpoint(&format!("models/{}", self.settings.model));
        let body = Self::request_body(request);

        let response =
            transport::post_json(&self.settings.client, &url, AuthScheme::Bearer(api_key), &body)
                .await?;
        Self::extract_text(response)
    }
}

impl ProviderAdapter for HuggingFaceProvider {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> BoxFuture<'a, Result<String, ProviderError>> {
        Box::pin(self.call(request))
    }

    fn provider_name(&self) -> &str {
        &self.settings.name
    }
}
