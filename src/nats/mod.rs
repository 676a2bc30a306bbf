pub mod client;
pub mod listener;
pub mod messages;

pub use client::NatsClient;
pub use listener::spawn_transcript_listener;
pub use messages::{InterruptionMessage, TranscriptMessage};
