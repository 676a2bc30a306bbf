use crate::analysis::AnalysisResult;
use crate::persona::PersonaId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One finalized utterance in a session's annotated transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Final transcript of the utterance
    pub text: String,

    /// Seconds between speech start and speech end
    pub duration: f64,

    pub analysis: AnalysisResult,

    /// When the utterance was finalized
    pub timestamp: DateTime<Utc>,
}

/// Statistics about a speech session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub session_id: String,

    pub persona: PersonaId,

    /// When the session was created
    pub started_at: DateTime<Utc>,

    /// Whether an utterance is currently being buffered
    pub is_speaking: bool,

    /// Number of finalized utterances
    pub responses_count: usize,

    /// Number of utterances that triggered an interruption
    pub interruptions_count: usize,

    /// Filler words across all finalized utterances
    pub total_filler_words: usize,

    /// Mean utterance duration in seconds (0 when nothing was said yet)
    pub average_duration_secs: f64,
}

impl SessionStats {
    pub(crate) fn from_history(
        session_id: &str,
        persona: PersonaId,
        started_at: DateTime<Utc>,
        is_speaking: bool,
        history: &[ResponseRecord],
    ) -> Self {
        let responses_count = history.len();
        let interruptions_count = history
            .iter()
            .filter(|r| r.analysis.should_interrupt)
            .count();
        let total_filler_words = history.iter().map(|r| r.analysis.filler_word_count).sum();
        let total_duration: f64 = history.iter().map(|r| r.duration).sum();

        Self {
            session_id: session_id.to_string(),
            persona,
            started_at,
            is_speaking,
            responses_count,
            interruptions_count,
            total_filler_words,
            average_duration_secs: if responses_count == 0 {
                0.0
            } else {
                total_duration / responses_count as f64
            },
        }
    }
}
