//! HTTP server for the completion relay.
//!
//! Exposes a single stateless endpoint that accepts an assembled turn as
//! `multipart/form-data`, calls the external completion provider, and
//! normalizes the result into the fixed [`TurnReply`] shape.
//!
//! ## Endpoints
//!
//! - `GET /health` — liveness probe
//! - `POST /api/chat` — submit a turn (fields: `messages` JSON, optional `image`)

use crate::config::AssistantConfig;
use crate::error::{AssistantError, Result};
use crate::provider::CompletionProvider;
use crate::relay::protocol::{ChatMessage, NO_RESPONSE, NOT_CONFIGURED, PROVIDER_FAILED, TurnReply};
use axum::Router;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

/// Runtime options for the relay server.
#[derive(Debug, Clone)]
pub struct RelayOptions {
    /// Host to bind to.
    pub host: String,
    /// Port to bind (0 = auto-assign).
    pub port: u16,
    /// Model identifier sent to the provider.
    pub model: String,
    /// Sampling temperature sent to the provider.
    pub temperature: f64,
    /// Bound on a single provider call.
    pub request_timeout: Duration,
    /// Whether a provider credential was resolved at startup.
    ///
    /// When false every turn is answered with the configuration-error reply
    /// and the provider is never invoked.
    pub credential_configured: bool,
}

impl RelayOptions {
    /// Derive relay options from the assistant config.
    #[must_use]
    pub fn from_config(config: &AssistantConfig, credential_configured: bool) -> Self {
        Self {
            host: config.relay.host.clone(),
            port: config.relay.port,
            model: config.llm.api_model.clone(),
            temperature: config.llm.temperature,
            request_timeout: config.llm.request_timeout(),
            credential_configured,
        }
    }
}

/// Shared state for axum handlers.
#[derive(Clone)]
struct AppState {
    provider: Arc<dyn CompletionProvider>,
    options: Arc<RelayOptions>,
}

/// The completion relay HTTP server.
///
/// Binds a listener and serves in a background tokio task. The task is
/// aborted on `shutdown()` or when the server is dropped.
pub struct RelayServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl RelayServer {
    /// Start the relay server.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start(
        provider: Arc<dyn CompletionProvider>,
        options: RelayOptions,
    ) -> Result<Self> {
        let bind_addr = format!("{}:{}", options.host, options.port);
        let state = AppState {
            provider,
            options: Arc::new(options),
        };

        let app = Router::new()
            .route("/health", get(handle_health))
            .route("/api/chat", post(handle_chat))
            .with_state(state);

        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| AssistantError::Relay(format!("relay bind failed: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| AssistantError::Relay(format!("failed to get local addr: {e}")))?;

        info!("completion relay listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("relay server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for RelayServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn handle_health() -> &'static str {
    "ok"
}

/// The turn endpoint.
///
/// One provider call per invocation, no retries, no caching, no streaming.
async fn handle_chat(
    State(state): State<AppState>,
    multipart: Multipart,
) -> (StatusCode, Json<TurnReply>) {
    let request_id = Uuid::new_v4();

    if !state.options.credential_configured {
        warn!(%request_id, "turn rejected: provider credential not configured");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(TurnReply::failure(
                NOT_CONFIGURED,
                "provider API key is not set in the environment",
            )),
        );
    }

    let turn = match read_turn_payload(multipart).await {
        Ok(turn) => turn,
        Err(e) => {
            // Malformed payloads surface as the generic provider-failure
            // shape; the boundary exposes no distinct error kind for them.
            warn!(%request_id, "turn payload rejected: {e}");
            return (
                StatusCode::BAD_GATEWAY,
                Json(TurnReply::failure(PROVIDER_FAILED, e.to_string())),
            );
        }
    };

    if let Some(image) = &turn.image {
        // The image is buffered but not forwarded to the provider; the
        // upload path is reserved for future vision-capable models.
        info!(
            %request_id,
            bytes = image.len(),
            "image attachment received (not forwarded to model)"
        );
    }

    info!(
        %request_id,
        messages = turn.messages.len(),
        model = %state.options.model,
        "forwarding turn to provider"
    );

    let result = state
        .provider
        .complete(
            &turn.messages,
            &state.options.model,
            state.options.temperature,
            state.options.request_timeout,
        )
        .await;

    match result {
        Ok(completion) => {
            let content = completion
                .first_content()
                .filter(|text| !text.is_empty())
                .unwrap_or(NO_RESPONSE)
                .to_owned();
            let reply = TurnReply::success(content, completion.total_tokens(), completion.model);
            (StatusCode::OK, Json(reply))
        }
        Err(e) => {
            warn!(%request_id, "provider call failed: {e}");
            (
                StatusCode::BAD_GATEWAY,
                Json(TurnReply::failure(PROVIDER_FAILED, e.to_string())),
            )
        }
    }
}

/// Parsed multipart turn payload.
struct TurnPayload {
    messages: Vec<ChatMessage>,
    image: Option<Bytes>,
}

/// Read the `messages` and optional `image` fields from the multipart body.
async fn read_turn_payload(mut multipart: Multipart) -> Result<TurnPayload> {
    let mut messages_json: Option<String> = None;
    let mut image: Option<Bytes> = None;

    loop {
        let field = multipart
            .next_field()
            .await
            .map_err(|e| AssistantError::Relay(format!("invalid multipart body: {e}")))?;
        let Some(field) = field else { break };

        let name = field.name().map(ToOwned::to_owned);
        match name.as_deref() {
            Some("messages") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AssistantError::Relay(format!("unreadable messages field: {e}")))?;
                messages_json = Some(text);
            }
            Some("image") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AssistantError::Relay(format!("unreadable image field: {e}")))?;
                image = Some(bytes);
            }
            // Unknown fields are skipped, not an error.
            _ => {}
        }
    }

    let messages_json = messages_json
        .ok_or_else(|| AssistantError::Relay("missing messages field".to_owned()))?;

    let messages: Vec<ChatMessage> = serde_json::from_str(&messages_json)
        .map_err(|e| AssistantError::Relay(format!("invalid messages JSON: {e}")))?;

    Ok(TurnPayload { messages, image })
}
