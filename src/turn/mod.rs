//! The conversation turn pipeline.
//!
//! A turn is one user submission plus the resulting assistant response (or
//! error entry), the atomic unit of conversation progress. The
//! [`TurnController`](controller::TurnController) owns the transcript and
//! enforces single-flight submission.

pub mod controller;
pub mod messages;

pub use controller::{SPOKEN_APOLOGY, TurnController};
pub use messages::{ControllerEvent, Message, TurnStatus};
