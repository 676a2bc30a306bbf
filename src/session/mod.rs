//! Speech session management
//!
//! This module provides the `SpeechSession` state machine that:
//! - Buffers the cumulative transcript while the user is speaking
//! - Measures utterance duration between speech start and speech end
//! - Runs the utterance analyzer when speech ends
//! - Keeps the annotated response history and session statistics

mod config;
mod session;
mod stats;

pub use config::SessionConfig;
pub use session::{SpeechSession, SpeechState};
pub use stats::{ResponseRecord, SessionStats};
