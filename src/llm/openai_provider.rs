//! OpenAI chat-completions provider.
//!
//! The request/response helpers here are the chat-completions wire format,
//! which DeepSeek also speaks; see [`DeepSeekProvider`](crate::llm::DeepSeekProvider).

use crate::llm::provider::{AdapterSettings, ProviderAdapter};
use crate::llm::transport::{self, AuthScheme};
use crate::llm::types::{GenerationRequest, ProviderError};
use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatMessage {
    pub content: Option<String>,
}

/// Build a single-turn chat-completions request body.
pub(crate) fn chat_completion_body(model: &str, request: &GenerationRequest) -> Value {
    json!({
        "model": model,
        "messages": [{"role": "user", "content": request.prompt}],
        "max_tokens": request.max_output_tokens,
    })
}

/// Extract `choices[0].message.content` from a chat-completions response.
pub(crate) fn extract_chat_completion_text(body: Value) -> Result<String, ProviderError> {
    let response: ChatCompletionResponse = serde_json::from_value(body)
        .map_err(|e| ProviderError::ResponseFormat(format!("unexpected response shape: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::ResponseFormat("empty choices array".to_string()))?;

    let content = choice
        .message
        .content
        .ok_or_else(|| ProviderError::ResponseFormat("missing message content".to_string()))?;

    transport::non_empty_text(&content)
}

/// Issue one chat-completions call with bearer authentication.
pub(crate) async fn chat_completion(
    settings: &AdapterSettings,
    request: &GenerationRequest,
) -> Result<String, ProviderError> {
    let api_key = settings.require_api_key()?;
    let body = chat_completion_body(&settings.model, request);
    let url = settings.endpoint("chat/completions");

    let response =
        transport::post_json(&settings.client, &url, AuthScheme::Bearer(api_key), &body).await?;
    extract_chat_completion_text(response)
}

/// OpenAI implementation of [`ProviderAdapter`]
pub struct OpenAIProvider {
    settings: AdapterSettings,
}

impl OpenAIProvider {
    pub fn new(settings: AdapterSettings) -> Self {
        Self { settings }
    }
}

impl ProviderAdapter for OpenAIProvider {
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
