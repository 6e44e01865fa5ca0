//! Shared HTTP plumbing for provider adapters.
//!
//! Every adapter sends exactly one JSON `POST` through [`post_json`], which maps
//! reqwest failures onto [`ProviderError`] so all four providers report
//! transport and format problems the same way.

use crate::llm::types::ProviderError;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default bound on a single provider call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest slice of an error body carried into a failure message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// How the credential is attached to the outbound request
#[derive(Debug, Clone, Copy)]
pub enum AuthScheme<'a> {
    Bearer(&'a str),
    Header { name: &'a str, value: &'a str },
}

/// Build the HTTP client shared by all adapters.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}

/// POST `body` to `url` and decode the JSON response.
pub async fn post_json(
    client: &reqwest::Client,
    url: &str,
    auth: AuthScheme<'_>,
    body: &Value,
) -> Result<Value, ProviderError> {
    debug!(url, "Dispatching provider request");

    let builder = client.post(url).json(body);
    let builder = match auth {
        AuthScheme::Bearer(token) => builder.bearer_auth(token),
        AuthScheme::Header { name, value } => builder.header(name, value),
    };

    let response = builder.send().await.map_err(map_reqwest_error)?;
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        return Err(ProviderError::Transport(format!(
            "HTTP {}: {}",
            status.as_u16(),
            truncate(&text, MAX_ERROR_BODY_CHARS)
        )));
    }

    let text = response.text().await.map_err(map_reqwest_error)?;
    serde_json::from_str(&text)
        .map_err(|e| ProviderError::ResponseFormat(format!("invalid JSON body: {}", e)))
}

/// Trim generated text and reject it if nothing is left.
pub fn non_empty_text(text: &str) -> Result<String, ProviderError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ProviderError::ResponseFormat(
            "response contained no generated text".to_string(),
        ))
    } else {
        Ok(trimmed.to_string())
    }
}

fn map_reqwest_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Transport(format!("request timed out: {}", error))
    } else {
        ProviderError::Transport(error.to_string())
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
