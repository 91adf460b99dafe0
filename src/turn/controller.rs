//! The turn controller: one coherent transcript, one turn at a time.
//!
//! Mediates between three input sources (typed text, finalized speech
//! transcripts, explicit submit) and the relay transport, maintaining the
//! append-only transcript and the single-flight discipline. Speech output is
//! cancel-before-speak: the newest utterance always wins.

use crate::error::Result;
use crate::relay::TurnTransport;
use crate::relay::protocol::{ChatMessage, ImageAttachment, TurnReply};
use crate::speech::{SpeechCapture, SpeechSynthesizer};
use crate::turn::messages::{ControllerEvent, Message, TurnStatus};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Fixed phrase spoken on the error path instead of the raw failure text.
pub const SPOKEN_APOLOGY: &str = "Sorry, I had trouble answering that.";

/// Orchestrates conversation turns against an injected transport and speech
/// stack.
pub struct TurnController {
    transport: Arc<dyn TurnTransport>,
    capture: Box<dyn SpeechCapture>,
    synth: Box<dyn SpeechSynthesizer>,
    history: Vec<Message>,
    pending_input: String,
    pending_image: Option<ImageAttachment>,
    in_flight: bool,
    capturing: bool,
    events: Option<mpsc::UnboundedSender<ControllerEvent>>,
}

impl TurnController {
    /// Create a controller over the given transport and speech stack.
    #[must_use]
    pub fn new(
        transport: Arc<dyn TurnTransport>,
        capture: Box<dyn SpeechCapture>,
        synth: Box<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            transport,
            capture,
            synth,
            history: Vec::new(),
            pending_input: String::new(),
            pending_image: None,
            in_flight: false,
            capturing: false,
            events: None,
        }
    }

    /// Attach an event channel for view notifications.
    #[must_use]
    pub fn with_events(mut self, events: mpsc::UnboundedSender<ControllerEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// The full transcript, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// The current pending input text.
    #[must_use]
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Whether an image is attached for the next turn.
    #[must_use]
    pub fn has_pending_image(&self) -> bool {
        self.pending_image.is_some()
    }

    /// Whether a turn is currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether continuous speech capture is active.
    #[must_use]
    pub fn is_capturing(&self) -> bool {
        self.capturing
    }

    /// Replace the pending input text (keystrokes or a finalized transcript).
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.pending_input = input.into();
    }

    /// Attach an image for the next turn, replacing any previous attachment.
    ///
    /// Permitted while a turn is in flight; it only affects the next turn.
    pub fn attach_image(&mut self, image: ImageAttachment) {
        self.pending_image = Some(image);
    }

    /// Submit the pending input as one turn.
    ///
    /// Appends exactly one user message before the relay call and exactly one
    /// assistant message (success or error) after it resolves, so the
    /// transcript grows by two per completed turn. Pending input and image
    /// are cleared unconditionally once the turn starts. All failures are
    /// absorbed into the error path; the in-flight flag never stays set.
    pub async fn submit(&mut self) -> TurnStatus {
        let input = self.pending_input.trim().to_owned();
        if input.is_empty() {
            return TurnStatus::Ignored;
        }
        if self.in_flight {
            info!("submit rejected: turn already in flight");
            return TurnStatus::Busy;
        }

        self.in_flight = true;
        self.pending_input.clear();
        let image = self.pending_image.take();

        self.append(Message::user(input));
        let wire: Vec<ChatMessage> = self.history.iter().map(Message::to_wire).collect();

        let result = self.transport.post_turn(&wire, image.as_ref()).await;
        let status = match result {
            Ok(TurnReply::Success { content, .. }) => {
                self.append(Message::assistant(content.clone()));
                self.say(&content);
                TurnStatus::Completed
            }
            Ok(TurnReply::Failure { error, details, .. }) => {
                self.append(Message::assistant_error(format!("{error}: {details}")));
                self.say(SPOKEN_APOLOGY);
                TurnStatus::Failed
            }
            Err(e) => {
                self.append(Message::assistant_error(e.to_string()));
                self.say(SPOKEN_APOLOGY);
                TurnStatus::Failed
            }
        };

        self.in_flight = false;
        status
    }

    /// Toggle continuous speech capture.
    ///
    /// Starting resets the recognizer's transcript buffer. Stopping with a
    /// non-empty finalized transcript overwrites the pending input and
    /// performs exactly one implicit submit; the submitted turn's status is
    /// returned, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the recognizer fails to start or stop. The
    /// capturing flag is left consistent with the recognizer state.
    pub async fn toggle_capture(&mut self) -> Result<Option<TurnStatus>> {
        if !self.capturing {
            self.capture.start()?;
            self.capturing = true;
            self.emit(ControllerEvent::CaptureStarted);
            return Ok(None);
        }

        let transcript = self.capture.stop()?;
        self.capturing = false;
        self.emit(ControllerEvent::CaptureStopped);

        match transcript {
            Some(text) if !text.trim().is_empty() => {
                self.set_input(text);
                Ok(Some(self.submit().await))
            }
            _ => Ok(None),
        }
    }

    /// Mirror the live partial transcript into the pending input.
    ///
    /// No-op unless capture is active and the recognizer has partial text.
    pub fn sync_partial(&mut self) {
        if !self.capturing {
            return;
        }
        if let Some(partial) = self.capture.poll_partial() {
            self.pending_input = partial;
        }
    }

    /// Append to the transcript and notify the view.
    fn append(&mut self, message: Message) {
        self.history.push(message);
        self.emit(ControllerEvent::TranscriptAppended {
            index: self.history.len() - 1,
        });
    }

    /// Speak `text`, canceling any current utterance first.
    ///
    /// Synthesis failures are logged, never propagated: speech is a side
    /// effect of the turn, not part of its outcome.
    fn say(&mut self, text: &str) {
        self.synth.cancel();
        if let Err(e) = self.synth.speak(text) {
            warn!("speech synthesis failed: {e}");
        }
    }

    fn emit(&self, event: ControllerEvent) {
        if let Some(events) = &self.events
            && events.send(event).is_err()
        {
            warn!("controller event channel closed");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use crate::speech::null::{NullCapture, NullSynthesizer};
    use async_trait::async_trait;

    /// Transport that must not be reached.
    struct UnreachableTransport;

    #[async_trait]
    impl TurnTransport for UnreachableTransport {
        async fn post_turn(
            &self,
            _messages: &[ChatMessage],
            _image: Option<&ImageAttachment>,
        ) -> Result<TurnReply> {
            panic!("transport must not be called");
        }
    }

    fn guarded_controller() -> TurnController {
        TurnController::new(
            Arc::new(UnreachableTransport),
            Box::new(NullCapture),
            Box::new(NullSynthesizer),
        )
    }

    #[tokio::test]
    async fn submit_rejected_while_in_flight() {
        let mut controller = guarded_controller();
        controller.set_input("hello");
        controller.in_flight = true;

        assert_eq!(controller.submit().await, TurnStatus::Busy);
        assert!(controller.history().is_empty());
        assert_eq!(controller.pending_input(), "hello");
    }

    #[tokio::test]
    async fn whitespace_input_is_a_no_op() {
        let mut controller = guarded_controller();
        controller.set_input("   \t  ");

        assert_eq!(controller.submit().await, TurnStatus::Ignored);
        assert!(controller.history().is_empty());
        assert!(!controller.in_flight());
    }
}
