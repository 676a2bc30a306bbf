//! Conversation driving
//!
//! Glue between the speech-to-text input, the per-conversation
//! `SpeechSession`, and the outbound interruption sink.

mod driver;
mod registry;
mod sink;

pub use driver::{ConversationDriver, TurnOutcome};
pub use registry::{DriverHandle, SessionRegistry};
pub use sink::{InterruptionNotice, InterruptionSink, TracingSink};
