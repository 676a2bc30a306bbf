use super::persona::{DecisionRule, Persona, PersonaId};
use crate::analysis::InterruptionReason;
use serde::{Deserialize, Serialize};

/// Friendly personas only cut in once an utterance runs this far past the threshold
const FRIENDLY_RAMBLING_MULTIPLIER: f64 = 1.5;

/// Where the filler-ratio threshold for a persona comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillerThresholdMode {
    /// Per-rule constants: tough 0.3, standard 0.4, friendly 0.5
    #[default]
    Fixed,
    /// The persona's configured `filler_tolerance_ratio`
    PersonaTolerance,
}

/// Signals extracted from one utterance, before the persona weighs them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtteranceSignals {
    pub is_rambling: bool,
    pub is_off_topic: bool,
    pub filler_ratio: f64,
    pub duration_seconds: f64,
}

const MESSAGES: &[(DecisionRule, InterruptionReason, &str)] = &[
    (
        DecisionRule::Tough,
        InterruptionReason::TooLong,
        "I need to interrupt. Your response is getting too long. Please be more concise.",
    ),
    (
        DecisionRule::Tough,
        InterruptionReason::TooManyFillers,
        "I'm interrupting because you're using too many filler words. Speak more directly.",
    ),
    (
        DecisionRule::Tough,
        InterruptionReason::OffTopic,
        "You're going off-topic. Let's stay focused on the debate question.",
    ),
    (
        DecisionRule::Friendly,
        InterruptionReason::TooLong,
        "I'd like to interject here. Your response is getting quite long.",
    ),
    (
        DecisionRule::Friendly,
        InterruptionReason::TooManyFillers,
        "I notice you're using many filler words. Try to speak more directly.",
    ),
    (
        DecisionRule::Standard,
        InterruptionReason::TooLong,
        "I need to interrupt. Your response is getting too long.",
    ),
    (
        DecisionRule::Standard,
        InterruptionReason::TooManyFillers,
        "I'm interrupting because you're using too many filler words.",
    ),
    (
        DecisionRule::Standard,
        InterruptionReason::OffTopic,
        "You're going off-topic. Let's stay focused.",
    ),
];

fn fallback_message(rule: DecisionRule) -> &'static str {
    match rule {
        DecisionRule::Tough | DecisionRule::Standard => {
            "I need to interrupt. Please be more concise."
        }
        DecisionRule::Friendly => "I'd like to interject here.",
    }
}

/// Combines utterance signals into an interruption verdict and picks the line
/// the moderator says when it cuts in
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonaPolicy {
    filler_threshold: FillerThresholdMode,
}

impl PersonaPolicy {
    pub fn new(filler_threshold: FillerThresholdMode) -> Self {
        Self { filler_threshold }
    }

    pub fn filler_threshold_mode(&self) -> FillerThresholdMode {
        self.filler_threshold
    }

    /// Filler ratio a persona tolerates before interrupting (strict `>`)
    pub fn filler_threshold(&self, persona: &Persona) -> f64 {
        match self.filler_threshold {
            FillerThresholdMode::PersonaTolerance => persona.filler_tolerance_ratio,
            FillerThresholdMode::Fixed => match persona.id.decision_rule() {
                DecisionRule::Tough => 0.3,
                DecisionRule::Standard => 0.4,
                DecisionRule::Friendly => 0.5,
            },
        }
    }

    /// First matching condition wins; later ones are not consulted.
    pub fn decide(&self, persona: &Persona, signals: &UtteranceSignals) -> InterruptionReason {
        let filler_threshold = self.filler_threshold(persona);

        match persona.id.decision_rule() {
            DecisionRule::Tough => {
                if signals.is_rambling {
                    InterruptionReason::TooLong
                } else if signals.filler_ratio > filler_threshold {
                    InterruptionReason::TooManyFillers
                } else if signals.is_off_topic {
                    InterruptionReason::OffTopic
                } else {
                    InterruptionReason::None
                }
            }
            DecisionRule::Friendly => {
                let limit = persona.interruption_threshold_seconds * FRIENDLY_RAMBLING_MULTIPLIER;
                if signals.is_rambling && signals.duration_seconds > limit {
                    InterruptionReason::TooLong
                } else if signals.filler_ratio > filler_threshold {
                    InterruptionReason::TooManyFillers
                } else {
                    InterruptionReason::None
                }
            }
            DecisionRule::Standard => {
                if signals.is_rambling {
                    InterruptionReason::TooLong
                } else if signals.filler_ratio > filler_threshold {
                    InterruptionReason::TooManyFillers
                } else {
                    InterruptionReason::None
                }
            }
        }
    }

    /// Persona-flavored interruption line; total over every combination
    pub fn message_for(persona_id: PersonaId, reason: InterruptionReason) -> &'static str {
        let rule = persona_id.decision_rule();
        MESSAGES
            .iter()
            .find(|(r, why, _)| *r == rule && *why == reason)
            .map(|(_, _, message)| *message)
            .unwrap_or_else(|| fallback_message(rule))
    }
}
