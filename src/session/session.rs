use super::config::SessionConfig;
use super::stats::{ResponseRecord, SessionStats};
use crate::analysis::{AnalysisResult, UtteranceAnalyzer};
use crate::persona::{Persona, PersonaPolicy};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Turn-taking state of the speaker
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SpeechState {
    /// Not speaking, nothing buffered
    #[default]
    Idle,
    /// Buffering the cumulative transcript of the current utterance
    Speaking { started_at: Instant, text: String },
}

/// Response tracking for one live conversation
///
/// Fed `(transcript_so_far, is_speaking)` updates by the speech-to-text side;
/// analyzes each utterance when speech ends and keeps the annotated history.
/// Not meant for concurrent mutation: the owning driver serializes updates.
pub struct SpeechSession {
    /// Session configuration
    config: SessionConfig,

    /// Shared scoring engine
    analyzer: Arc<UtteranceAnalyzer>,

    /// When the session was created
    started_at: chrono::DateTime<chrono::Utc>,

    state: SpeechState,

    /// Finalized utterances, oldest first
    history: Vec<ResponseRecord>,
}

impl SpeechSession {
    /// Create a new speech session
    pub fn new(config: SessionConfig, analyzer: Arc<UtteranceAnalyzer>) -> Self {
        info!(
            "Creating speech session: {} (persona={})",
            config.session_id, config.persona.id
        );

        Self {
            config,
            analyzer,
            started_at: Utc::now(),
            state: SpeechState::Idle,
            history: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }

    pub fn persona(&self) -> &Persona {
        &self.config.persona
    }

    pub fn state(&self) -> &SpeechState {
        &self.state
    }

    pub fn is_speaking(&self) -> bool {
        matches!(self.state, SpeechState::Speaking { .. })
    }

    /// Transcript buffered for the utterance in progress
    pub fn current_text(&self) -> Option<&str> {
        match &self.state {
            SpeechState::Speaking { text, .. } => Some(text),
            SpeechState::Idle => None,
        }
    }

    /// Apply a transcript update using the wall clock
    pub fn update(&mut self, transcript: &str, is_speaking: bool) -> Option<AnalysisResult> {
        self.update_at(transcript, is_speaking, Instant::now())
    }

    /// Apply a transcript update observed at `now`
    ///
    /// Returns the analysis only when this update ends an utterance.
    pub fn update_at(
        &mut self,
        transcript: &str,
        is_speaking: bool,
        now: Instant,
    ) -> Option<AnalysisResult> {
        if is_speaking {
            match &mut self.state {
                // Transcripts are cumulative, not deltas
                SpeechState::Speaking { text, .. } => transcript.clone_into(text),
                SpeechState::Idle => {
                    debug!("[{}] speech started", self.config.session_id);
                    self.state = SpeechState::Speaking {
                        started_at: now,
                        text: transcript.to_string(),
                    };
                }
            }
            return None;
        }

        match std::mem::take(&mut self.state) {
            SpeechState::Speaking { started_at, text } => {
                let duration = now.saturating_duration_since(started_at).as_secs_f64();
                Some(self.finalize(text, duration))
            }
            SpeechState::Idle => None,
        }
    }

    fn finalize(&mut self, text: String, duration: f64) -> AnalysisResult {
        let analysis = self.analyzer.analyze(&text, duration, &self.config.persona);

        debug!(
            "[{}] utterance finalized: words={}, fillers={}, duration={:.1}s, reason={}",
            self.config.session_id,
            analysis.word_count,
            analysis.filler_word_count,
            analysis.response_duration_seconds,
            analysis.interruption_reason
        );

        self.history.push(ResponseRecord {
            text,
            duration: analysis.response_duration_seconds,
            analysis: analysis.clone(),
            timestamp: Utc::now(),
        });

        analysis
    }

    /// Persona line for an analysis that calls for an interruption
    pub fn interruption_message(&self, analysis: &AnalysisResult) -> Option<&'static str> {
        analysis.should_interrupt.then(|| {
            PersonaPolicy::message_for(self.config.persona.id, analysis.interruption_reason)
        })
    }

    /// Finalized utterances, oldest first
    pub fn history(&self) -> &[ResponseRecord] {
        &self.history
    }

    /// Get current session statistics
    pub fn stats(&self) -> SessionStats {
        SessionStats::from_history(
            &self.config.session_id,
            self.config.persona.id,
            self.started_at,
            self.is_speaking(),
            &self.history,
        )
    }
}
