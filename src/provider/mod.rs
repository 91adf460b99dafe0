//! Completion provider abstraction.
//!
//! Defines the [`CompletionProvider`] trait the relay calls through, plus the
//! provider-neutral response types. The only shipped implementation is
//! [`openai::OpenAiProvider`]; tests substitute their own.

pub mod openai;

use crate::error::Result;
use crate::relay::protocol::ChatMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A chat completion returned by a provider.
///
/// Mirrors the subset of the OpenAI chat-completions response the relay
/// consumes; unknown fields are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletion {
    /// Completion choices (the relay reads the first).
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token usage statistics, when the provider reports them.
    #[serde(default)]
    pub usage: Option<Usage>,
    /// Model identifier echoed back by the provider.
    #[serde(default)]
    pub model: String,
}

impl ChatCompletion {
    /// Text of the first choice's message, if any.
    #[must_use]
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
    }

    /// Total token count, or 0 when the provider reported no usage.
    #[must_use]
    pub fn total_tokens(&self) -> u64 {
        self.usage.as_ref().map_or(0, |u| u.total_tokens)
    }
}

/// A single completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ChoiceMessage,
    /// Reason the model stopped generating (`stop`, `length`, etc.).
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The message inside a completion choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceMessage {
    /// Generated text content.
    #[serde(default)]
    pub content: String,
}

/// Token usage statistics for a completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Total tokens (prompt + completion).
    #[serde(default)]
    pub total_tokens: u64,
}

/// Trait for external completion providers.
///
/// One call per turn, no streaming: the full completion is buffered before
/// returning. The `timeout` bounds the whole call; implementations must
/// resolve with an error rather than hang past it.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Request a completion for the given conversation context.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Provider`](crate::error::AssistantError::Provider)
    /// on network failure, timeout, or a non-success upstream response.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &str,
        temperature: f64,
        timeout: Duration,
    ) -> Result<ChatCompletion>;
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn parses_full_provider_response() {
        let raw = serde_json::json!({
            "id": "chatcmpl-abc",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "m1",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Paris"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 8, "completion_tokens": 4, "total_tokens": 12}
        });

        let completion: ChatCompletion = serde_json::from_value(raw).unwrap();
        assert_eq!(completion.first_content(), Some("Paris"));
        assert_eq!(completion.total_tokens(), 12);
        assert_eq!(completion.model, "m1");
    }

    #[test]
    fn missing_choices_and_usage_default() {
        let raw = serde_json::json!({"model": "m2"});
        let completion: ChatCompletion = serde_json::from_value(raw).unwrap();
        assert!(completion.first_content().is_none());
        assert_eq!(completion.total_tokens(), 0);
    }
}
