use crate::llm::provider::{AdapterSettings, ProviderAdapter};
use crate::llm::transport::{self, AuthScheme};
use crate::llm::types::{GenerationRequest, ProviderError};
use futures::future::BoxFuture;
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Google Gemini implementation of [`ProviderAdapter`] (`generateContent` API)
pub struct GeminiProvider {
    settings: AdapterSettings,
}

impl GeminiProvider {
    pub fn new(settings: AdapterSettings) -> Self {
        Self { settings }
    }

    fn request_body(request: &GenerationRequest) -> Value {
        json!({
            "contents": [{"parts": [{"text": request.prompt}]}],
            "generationConfig": {"maxOutputTokens": request.max_output_tokens},
        })
    }

    /// Concatenate the text parts of the first candidate.
    fn extract_text(body: Value) -> Result<String, ProviderError> {
        let response: GenerateContentResponse = serde_json::from_value(body).map_err(|e| {
            ProviderError::ResponseFormat(format!("unexpected response shape: {}", e))
        })?;

        let content = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .ok_or_else(|| ProviderError::ResponseFormat("no candidates returned".to_string()))?;

        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        transport::non_empty_text(&text)
    }

    async fn call(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let api_key = self.settings.require_api_key()?;
        let url = self
            .settings
            .endpoint(&format!("models/{}:generateContent", self.settings.model));
        let body = Self::request_body(request);

        let response = transport::post_json(
            &self.settings.client,
            &url,
            AuthScheme::Header {
                name: "x-goog-api-key",
                value: api_key,
            },
            &body,
        )
        .await?;

        Self::extract_text(response)
    }
}

impl ProviderAdapter for GeminiProvider {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::transport::test_server::serve_once;
    use crate::llm::types::ProviderKind;
    use url::Url;

    #[test]
    fn test_request_body_uses_single_content_format() {
        let body = GeminiProvider::request_body(&GenerationRequest::new("Plan a trip", 1000));

        assert_eq!(body["contents"][0]["parts"][0]["text"], "Plan a trip");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1000);
    }

    #[test]
    fn test_joins_candidate_parts() {
        let body = json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": " First"}, {"text": " second "}]},
                "finishReason": "STOP"
            }]
        });

        assert_eq!(GeminiProvider::extract_text(body).unwrap(), "First second");
    }

    #[test]
    fn test_missing_candidates_is_format_error() {
        let blocked = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        assert!(matches!(
            GeminiProvider::extract_text(blocked),
            Err(ProviderError::ResponseFormat(_))
        ));
    }

    #[test]
    fn test_endpoint_includes_model() {
        let settings =
            AdapterSettings::defaults(ProviderKind::Gemini, None, reqwest::Client::new()).unwrap();
        assert_eq!(
            settings.endpoint(&format!("models/{}:generateContent", settings.model)),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_generate_content_over_http() {
        let (base, received) = serve_once(
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"Structured "},{"text":"prompt"}]}}]}"#,
        )
        .await;
        let mut settings = AdapterSettings::defaults(
            ProviderKind::Gemini,
            Some("g-key".to_string()),
            reqwest::Client::new(),
        )
        .unwrap();
        settings.base_url = Url::parse(&format!("{}/v1beta", base)).unwrap();

        let text = GeminiProvider::new(settings)
            .generate(&GenerationRequest::new("Plan a trip", 1000))
            .await
            .unwrap();
        assert_eq!(text, "Structured prompt");

        let request = received.await.unwrap();
        assert_eq!(
            request.request_line,
            "POST /v1beta/models/gemini-2.0-flash:generateContent HTTP/1.1"
        );
        assert_eq!(request.header("x-goog-api-key"), Some("g-key"));
        assert_eq!(request.header("authorization"), None);
        assert_eq!(
            request.json(),
            json!({
                "contents": [{"parts": [{"text": "Plan a trip"}]}],
                "generationConfig": {"maxOutputTokens": 1000}
            })
        );
    }
}
