//! Error types for the parlance turn pipeline.

/// Top-level error type for the assistant.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// Configuration error (missing credential, invalid config file).
    #[error("config error: {0}")]
    Config(String),

    /// External completion provider error (network, timeout, bad status).
    #[error("provider error: {0}")]
    Provider(String),

    /// Relay server error (bind, serve).
    #[error("relay error: {0}")]
    Relay(String),

    /// Controller-to-relay transport error.
    #[error("transport error: {0}")]
    Transport(String),

    /// Speech capture or synthesis error.
    #[error("speech error: {0}")]
    Speech(String),

    /// Event channel send/receive error.
    #[error("channel error: {0}")]
    Channel(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AssistantError>;
