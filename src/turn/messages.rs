//! Transcript message types and controller events.

use crate::relay::protocol::{ChatMessage, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in the conversation transcript.
///
/// Immutable once appended; the transcript is append-only and order is
/// insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message author.
    pub role: Role,
    /// Text content of the message.
    pub content: String,
    /// Whether this entry records a failed turn.
    pub error: bool,
    /// When the entry was appended.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// A user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            error: false,
            timestamp: Utc::now(),
        }
    }

    /// An assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            error: false,
            timestamp: Utc::now(),
        }
    }

    /// An assistant message recording a failed turn.
    #[must_use]
    pub fn assistant_error(content: impl Into<String>) -> Self {
        Self {
            error: true,
            ..Self::assistant(content)
        }
    }

    /// The wire form sent to the relay (role + content only).
    #[must_use]
    pub fn to_wire(&self) -> ChatMessage {
        ChatMessage {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// Outcome of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    /// The turn completed with an assistant response.
    Completed,
    /// The turn failed; an error entry was appended to the transcript.
    Failed,
    /// Empty input; nothing was submitted.
    Ignored,
    /// A turn is already in flight; nothing was submitted.
    Busy,
}

/// Notifications emitted by the controller for the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// A message was appended to the transcript (the view scrolls to it).
    TranscriptAppended {
        /// Index of the new message in the transcript.
        index: usize,
    },
    /// Continuous speech capture started.
    CaptureStarted,
    /// Continuous speech capture stopped.
    CaptureStopped,
}
