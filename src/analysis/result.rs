use serde::{Deserialize, Serialize};
use std::fmt;

/// Why the moderator decided to cut in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptionReason {
    #[default]
    None,
    TooLong,
    TooManyFillers,
    OffTopic,
}

impl InterruptionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterruptionReason::None => "none",
            InterruptionReason::TooLong => "too_long",
            InterruptionReason::TooManyFillers => "too_many_fillers",
            InterruptionReason::OffTopic => "off_topic",
        }
    }
}

impl fmt::Display for InterruptionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for a single utterance
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Word count or duration exceeded the persona's limits
    pub is_rambling: bool,

    /// Whole-word filler occurrences summed over every filler term
    pub filler_word_count: usize,

    /// A hedging phrase was found
    pub is_off_topic: bool,

    /// Utterance duration, clamped to be non-negative
    pub response_duration_seconds: f64,

    pub should_interrupt: bool,

    /// `None` exactly when `should_interrupt` is false
    pub interruption_reason: InterruptionReason,

    /// Whitespace-separated tokens
    pub word_count: usize,

    /// `filler_word_count / max(word_count, 1)`
    pub filler_ratio: f64,
}
