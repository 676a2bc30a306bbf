use crate::analysis::InterruptionReason;
use crate::persona::PersonaId;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// What the moderator should say, handed to the text-to-speech side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterruptionNotice {
    pub session_id: String,
    pub persona: PersonaId,
    pub reason: InterruptionReason,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Outbound edge toward the text-to-speech / turn-taking collaborator
///
/// Implementations:
/// - `NatsClient`: publishes on `moderator.interrupt.<session_id>`
/// - `TracingSink`: logs only (no speech pipeline attached)
#[async_trait::async_trait]
pub trait InterruptionSink: Send + Sync {
    /// Deliver an interruption for the moderator to speak
    async fn deliver(&self, notice: &InterruptionNotice) -> Result<()>;
}

/// Sink that only logs interruptions
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[async_trait::async_trait]
impl InterruptionSink for TracingSink {
    async fn deliver(&self, notice: &InterruptionNotice) -> Result<()> {
        info!(
            "[{}] moderator interrupts ({}): {}",
            notice.session_id, notice.reason, notice.message
        );
        Ok(())
    }
}
