//! No-op speech implementations for headless deployments.

use crate::error::Result;
use crate::speech::{SpeechCapture, SpeechSynthesizer};
use tracing::debug;

/// Capture that never produces a transcript.
#[derive(Debug, Default)]
pub struct NullCapture;

impl SpeechCapture for NullCapture {
    fn start(&mut self) -> Result<()> {
        debug!("null capture started");
        Ok(())
    }

    fn stop(&mut self) -> Result<Option<String>> {
        debug!("null capture stopped");
        Ok(None)
    }

    fn poll_partial(&self) -> Option<String> {
        None
    }
}

/// Synthesizer that logs instead of speaking.
#[derive(Debug, Default)]
pub struct NullSynthesizer;

impl SpeechSynthesizer for NullSynthesizer {
    fn speak(&mut self, text: &str) -> Result<()> {
        debug!(chars = text.len(), "null synthesizer: speak");
        Ok(())
    }

    fn cancel(&mut self) {
        debug!("null synthesizer: cancel");
    }
}
