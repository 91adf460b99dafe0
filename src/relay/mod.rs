//! The completion relay: server, client transport, and shared wire types.
//!
//! The relay is the server-side boundary between the turn controller and the
//! external completion provider. It is stateless: one provider call per
//! request, no retries, no caching, the full response buffered before reply.

pub mod client;
pub mod protocol;
pub mod server;

use crate::error::Result;
use async_trait::async_trait;
use protocol::{ChatMessage, ImageAttachment, TurnReply};

/// Transport seam between the turn controller and the relay.
///
/// The controller calls this exactly once per submitted turn. An `Err` means
/// the relay could not be reached at all; a [`TurnReply::Failure`] means the
/// relay answered with a failure shape (missing credential, provider error).
/// The controller treats both as the error path of the turn.
#[async_trait]
pub trait TurnTransport: Send + Sync {
    /// Post one assembled turn and await the relay's reply.
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::Transport`](crate::error::AssistantError::Transport)
    /// when the relay is unreachable or its reply is unparseable.
    async fn post_turn(
        &self,
        messages: &[ChatMessage],
        image: Option<&ImageAttachment>,
    ) -> Result<TurnReply>;
}
