//! Wire types shared by the relay server and its client transport.

use serde::{Deserialize, Serialize};

/// Message roles admitted by the relay wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A message typed or spoken by the user.
    User,
    /// A response produced by the assistant.
    Assistant,
}

/// A single message in the serialized conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message author.
    pub role: Role,
    /// The text content of the message.
    pub content: String,
}

impl ChatMessage {
    /// Shorthand for a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Shorthand for an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// An image attached to a turn.
///
/// At most one per turn. The relay buffers it but does not forward it to the
/// provider; the upload path is reserved for future vision-capable models.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    /// Original file name, forwarded as the multipart part file name.
    pub file_name: String,
    /// MIME type of the image data.
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: bytes::Bytes,
}

/// Placeholder content when the provider returns no choices.
pub const NO_RESPONSE: &str = "No response";

/// Generic error text for a failed provider call.
pub const PROVIDER_FAILED: &str = "AI processing failed";

/// Error text when the relay is missing its provider credential.
pub const NOT_CONFIGURED: &str = "AI processor not configured";

/// The relay's reply to a submitted turn.
///
/// Exactly one of the two shapes is ever produced; the `success` literal
/// disambiguates during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TurnReply {
    /// The provider produced a completion.
    Success {
        /// Always `true`.
        success: bool,
        /// Text of the first completion choice, or [`NO_RESPONSE`].
        content: String,
        /// Total tokens reported by the provider, or 0.
        tokens_used: u64,
        /// Model identifier echoed back by the provider.
        model: String,
    },
    /// The turn failed (missing credential, malformed payload, provider error).
    Failure {
        /// Always `false`.
        success: bool,
        /// Generic error description, safe to display.
        error: String,
        /// Underlying failure message.
        details: String,
    },
}

impl TurnReply {
    /// Build a success reply.
    #[must_use]
    pub fn success(content: impl Into<String>, tokens_used: u64, model: impl Into<String>) -> Self {
        Self::Success {
            success: true,
            content: content.into(),
            tokens_used,
            model: model.into(),
        }
    }

    /// Build a failure reply.
    #[must_use]
    pub fn failure(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Failure {
            success: false,
            error: error.into(),
            details: details.into(),
        }
    }

    /// Whether this reply carries a completion.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
