use super::lexicon::Lexicon;
use super::result::{AnalysisResult, InterruptionReason};
use crate::persona::{FillerThresholdMode, Persona, PersonaPolicy, UtteranceSignals};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Tunables that apply to every persona
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Utterances with more words than this are rambling regardless of duration
    pub max_words: usize,

    pub filler_threshold: FillerThresholdMode,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_words: 100,
            filler_threshold: FillerThresholdMode::Fixed,
        }
    }
}

/// Stateless utterance scoring engine
///
/// Shared across sessions behind an `Arc`; `analyze` only reads `self`.
#[derive(Debug, Clone)]
pub struct UtteranceAnalyzer {
    lexicon: Lexicon,
    settings: AnalysisSettings,
    policy: PersonaPolicy,
}

impl UtteranceAnalyzer {
    pub fn new(lexicon: Lexicon, settings: AnalysisSettings) -> Self {
        Self {
            lexicon,
            policy: PersonaPolicy::new(settings.filler_threshold),
            settings,
        }
    }

    /// Built-in English lexicon with default settings
    pub fn english() -> Result<Self> {
        Ok(Self::new(Lexicon::english()?, AnalysisSettings::default()))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    pub fn policy(&self) -> &PersonaPolicy {
        &self.policy
    }

    /// Score one utterance against a persona
    ///
    /// Never fails: empty text yields zero words and zero fillers, and a
    /// negative or NaN duration is treated as zero.
    pub fn analyze(&self, text: &str, duration_seconds: f64, persona: &Persona) -> AnalysisResult {
        let duration_seconds = if duration_seconds > 0.0 {
            duration_seconds
        } else {
            0.0
        };

        let lowered = text.to_lowercase();
        let word_count = lowered.split_whitespace().count();

        let filler_word_count = self.lexicon.count_fillers(&lowered);
        let filler_ratio = filler_word_count as f64 / word_count.max(1) as f64;

        let is_rambling = word_count > self.settings.max_words
            || duration_seconds > persona.interruption_threshold_seconds;
        let is_off_topic = self.lexicon.is_off_topic(&lowered);

        let signals = UtteranceSignals {
            is_rambling,
            is_off_topic,
            filler_ratio,
            duration_seconds,
        };
        let interruption_reason = self.policy.decide(persona, &signals);

        AnalysisResult {
            is_rambling,
            filler_word_count,
            is_off_topic,
            response_duration_seconds: duration_seconds,
            should_interrupt: interruption_reason != InterruptionReason::None,
            interruption_reason,
            word_count,
            filler_ratio,
        }
    }
}
