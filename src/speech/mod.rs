//! Speech capture and synthesis capability traits.
//!
//! The platform speech stack (continuous recognition, utterance playback) is
//! abstracted behind two narrow traits so the turn pipeline can run and be
//! tested without a real audio stack. Headless deployments use the no-op
//! implementations in [`null`].

pub mod null;

use crate::error::Result;

/// Continuous speech-to-text capture.
///
/// At most one capture session is active per instance. Implementations own
/// the transcript buffer; `start` resets it so a new session never inherits
/// text from the previous one.
pub trait SpeechCapture: Send {
    /// Begin continuous recognition, discarding any previous transcript.
    ///
    /// # Errors
    ///
    /// Returns an error if the recognizer cannot start.
    fn start(&mut self) -> Result<()>;

    /// Stop recognition and return the finalized transcript, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the recognizer fails while finalizing.
    fn stop(&mut self) -> Result<Option<String>>;

    /// The live (possibly partial) transcript while capture is active.
    fn poll_partial(&self) -> Option<String>;
}

/// Text-to-speech output.
///
/// At most one utterance is audible per instance; callers cancel before
/// speaking so the newest utterance always wins.
pub trait SpeechSynthesizer: Send {
    /// Speak the given text.
    ///
    /// # Errors
    ///
    /// Returns an error if synthesis fails to start.
    fn speak(&mut self, text: &str) -> Result<()>;

    /// Cancel any currently playing utterance. No-op when idle.
    fn cancel(&mut self);
}
