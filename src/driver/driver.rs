use super::sink::{InterruptionNotice, InterruptionSink};
use crate::analysis::AnalysisResult;
use crate::session::SpeechSession;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Result of an update that ended an utterance
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub analysis: AnalysisResult,

    /// Present when the moderator interrupted
    pub notice: Option<InterruptionNotice>,
}

/// Drives one live conversation: feeds transcript updates into its session
/// and forwards interruptions to the speech side
pub struct ConversationDriver {
    session: SpeechSession,
    sink: Arc<dyn InterruptionSink>,
}

impl ConversationDriver {
    pub fn new(session: SpeechSession, sink: Arc<dyn InterruptionSink>) -> Self {
        Self { session, sink }
    }

    pub fn session(&self) -> &SpeechSession {
        &self.session
    }

    pub fn into_session(self) -> SpeechSession {
        self.session
    }

    /// Apply a transcript update using the wall clock
    pub async fn handle_update(
        &mut self,
        transcript: &str,
        is_speaking: bool,
    ) -> Result<Option<TurnOutcome>> {
        self.handle_update_at(transcript, is_speaking, Instant::now())
            .await
    }

    /// Apply a transcript update observed at `now`
    ///
    /// The analysis is recorded in the session history before the sink is
    /// called, so a failed delivery never loses the utterance.
    pub async fn handle_update_at(
        &mut self,
        transcript: &str,
        is_speaking: bool,
        now: Instant,
    ) -> Result<Option<TurnOutcome>> {
        let Some(analysis) = self.session.update_at(transcript, is_speaking, now) else {
            return Ok(None);
        };

        let notice = self
            .session
            .interruption_message(&analysis)
            .map(|message| InterruptionNotice {
                session_id: self.session.session_id().to_string(),
                persona: self.session.persona().id,
                reason: analysis.interruption_reason,
                message: message.to_string(),
                timestamp: Utc::now(),
            });

        if let Some(notice) = &notice {
            info!(
                "Interrupting session {} ({})",
                notice.session_id, notice.reason
            );
            self.sink
                .deliver(notice)
                .await
                .with_context(|| format!("Failed to deliver interruption for {}", notice.session_id))?;
        }

        Ok(Some(TurnOutcome { analysis, notice }))
    }
}
