use crate::analysis::InterruptionReason;
use crate::driver::InterruptionNotice;
use crate::persona::PersonaId;
use serde::{Deserialize, Serialize};

/// Transcript message received from the STT service
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub session_id: String,
    /// Cumulative transcript of the current utterance
    pub text: String,
    pub partial: bool,
    /// Voice activity; when absent, a partial transcript means still speaking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_speaking: Option<bool>,
    pub timestamp: String, // RFC3339 timestamp
    #[serde(default)]
    pub confidence: Option<f32>,
}

impl TranscriptMessage {
    pub fn speaking(&self) -> bool {
        self.is_speaking.unwrap_or(self.partial)
    }
}

/// Interruption message published for the TTS service
#[derive(Debug, Serialize, Deserialize)]
pub struct InterruptionMessage {
    pub session_id: String,
    pub persona: PersonaId,
    pub reason: InterruptionReason,
    pub message: String,
    pub timestamp: String, // RFC3339 timestamp
}

impl From<&InterruptionNotice> for InterruptionMessage {
    fn from(notice: &InterruptionNotice) -> Self {
        Self {
            session_id: notice.session_id.clone(),
            persona: notice.persona,
            reason: notice.reason,
            message: notice.message.clone(),
            timestamp: notice.timestamp.to_rfc3339(),
        }
    }
}
