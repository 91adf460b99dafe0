//! Parlance: voice-enabled chat assistant.
//!
//! This crate provides the conversation turn pipeline for a chat assistant:
//! typed or spoken input is frozen into a user message, forwarded through a
//! stateless HTTP relay to an external completion provider, and the reply is
//! appended to the transcript and spoken aloud.
//!
//! # Architecture
//!
//! Two collaborating components, each behind narrow seams:
//! - **Turn controller** ([`turn`]): owns the append-only transcript, the
//!   pending input/image, and the single-flight discipline. Speech capture
//!   and synthesis are injected via the [`speech`] capability traits.
//! - **Completion relay** ([`relay`]): one `multipart/form-data` endpoint
//!   that injects the provider credential, calls the provider through the
//!   [`provider`] seam with a bounded timeout, and normalizes the result
//!   into a fixed reply shape.

pub mod config;
pub mod error;
pub mod provider;
pub mod relay;
pub mod speech;
pub mod turn;

pub use config::AssistantConfig;
pub use error::{AssistantError, Result};
pub use relay::server::{RelayOptions, RelayServer};
pub use turn::{TurnController, TurnStatus};
