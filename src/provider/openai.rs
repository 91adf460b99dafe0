//! OpenAI-compatible completion provider.
//!
//! Works against any server implementing the chat completions API:
//! api.openai.com, Ollama, vLLM, llama.cpp server, etc. Non-streaming:
//! the relay buffers the full response before replying.

use crate::error::{AssistantError, Result};
use crate::provider::{ChatCompletion, CompletionProvider};
use crate::relay::protocol::ChatMessage;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Completion provider speaking the OpenAI chat completions protocol.
pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiProvider {
    /// Create a provider for the given base URL and API key.
    ///
    /// An empty `api_key` omits the `Authorization` header, which local
    /// servers (Ollama, LM Studio) accept.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Normalized chat completions endpoint URL.
    ///
    /// Accepts base URLs with or without a trailing `/v1` segment.
    fn completions_url(&self) -> String {
        let base = self
            .base_url
            .strip_suffix("/v1")
            .unwrap_or(&self.base_url)
            .trim_end_matches('/');
        format!("{base}/v1/chat/completions")
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &str,
        temperature: f64,
        timeout: Duration,
    ) -> Result<ChatCompletion> {
        let body = serde_json::json!({
            "model": model,
            "messages": messages,
            "temperature": temperature,
        });

        let url = self.completions_url();
        debug!(%url, model, "requesting completion");

        let mut request = self.client.post(&url).timeout(timeout).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AssistantError::Provider(format!("provider call timed out: {e}"))
            } else {
                AssistantError::Provider(format!("provider request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AssistantError::Provider(format!(
                "provider returned {status}: {text}"
            )));
        }

        response
            .json::<ChatCompletion>()
            .await
            .map_err(|e| AssistantError::Provider(format!("invalid provider response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn completions_url_normalizes_base() {
        let plain = OpenAiProvider::new("https://api.openai.com", "");
        assert_eq!(
            plain.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );

        let with_v1 = OpenAiProvider::new("http://localhost:11434/v1", "");
        assert_eq!(
            with_v1.completions_url(),
            "http://localhost:11434/v1/chat/completions"
        );

        let trailing_slash = OpenAiProvider::new("http://localhost:8080/", "");
        assert_eq!(
            trailing_slash.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }
}
