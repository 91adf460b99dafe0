//! HTTP client transport for the completion relay.

use crate::error::{AssistantError, Result};
use crate::relay::TurnTransport;
use crate::relay::protocol::{ChatMessage, ImageAttachment, TurnReply};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

/// [`TurnTransport`] over HTTP, talking to a [`RelayServer`](crate::relay::server::RelayServer).
pub struct RelayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RelayClient {
    /// Create a client for the relay at `base_url` (e.g. `http://127.0.0.1:8787`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/chat", base.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl TurnTransport for RelayClient {
    async fn post_turn(
        &self,
        messages: &[ChatMessage],
        image: Option<&ImageAttachment>,
    ) -> Result<TurnReply> {
        let messages_json = serde_json::to_string(messages)
            .map_err(|e| AssistantError::Transport(format!("turn serialization failed: {e}")))?;

        let mut form = Form::new().text("messages", messages_json);
        if let Some(image) = image {
            let part = Part::bytes(image.bytes.to_vec())
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)
                .map_err(|e| AssistantError::Transport(format!("bad image MIME type: {e}")))?;
            form = form.part("image", part);
        }

        debug!(endpoint = %self.endpoint, messages = messages.len(), "posting turn");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AssistantError::Transport(format!("relay unreachable: {e}")))?;

        // Failure replies ride on non-2xx statuses; parse the body either way
        // so the caller sees the relay's failure shape instead of a bare
        // status code.
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AssistantError::Transport(format!("relay reply unreadable: {e}")))?;

        serde_json::from_str::<TurnReply>(&body).map_err(|e| {
            AssistantError::Transport(format!("relay reply unparseable ({status}): {e}"))
        })
    }
}
