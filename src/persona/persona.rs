use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Moderator persona identifier
///
/// Unknown identifiers parse to `Standard` so a stale or misspelled
/// configuration value never blocks a session from starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum PersonaId {
    #[default]
    Standard,
    Tough,
    Friendly,
    Technical,
    Executive,
}

/// Decision rule a persona applies when combining analysis signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionRule {
    /// Interrupts on rambling, then fillers, then off-topic hedging
    Tough,
    /// Interrupts only on long rambling or very heavy filler use
    Friendly,
    /// Interrupts on rambling, then fillers
    Standard,
}

impl PersonaId {
    pub const ALL: [PersonaId; 5] = [
        PersonaId::Standard,
        PersonaId::Tough,
        PersonaId::Friendly,
        PersonaId::Technical,
        PersonaId::Executive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaId::Standard => "standard",
            PersonaId::Tough => "tough",
            PersonaId::Friendly => "friendly",
            PersonaId::Technical => "technical",
            PersonaId::Executive => "executive",
        }
    }

    /// Parse an identifier, reporting whether it was recognized
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// Technical and executive personas share the standard rule
    pub fn decision_rule(&self) -> DecisionRule {
        match self {
            PersonaId::Tough => DecisionRule::Tough,
            PersonaId::Friendly => DecisionRule::Friendly,
            PersonaId::Standard | PersonaId::Technical | PersonaId::Executive => {
                DecisionRule::Standard
            }
        }
    }

    /// Default `(interruption_threshold_seconds, filler_tolerance_ratio)`
    pub fn defaults(&self) -> (f64, f64) {
        match self {
            PersonaId::Tough => (60.0, 0.3),
            PersonaId::Friendly => (180.0, 0.7),
            PersonaId::Standard | PersonaId::Technical | PersonaId::Executive => (120.0, 0.5),
        }
    }
}

impl FromStr for PersonaId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s).unwrap_or_default())
    }
}

impl From<String> for PersonaId {
    fn from(value: String) -> Self {
        Self::parse(&value).unwrap_or_default()
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interruption strictness profile, fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub id: PersonaId,

    /// Utterances longer than this are rambling
    pub interruption_threshold_seconds: f64,

    /// Carried from configuration; only consulted in
    /// `FillerThresholdMode::PersonaTolerance`
    pub filler_tolerance_ratio: f64,
}

impl Persona {
    pub fn new(
        id: PersonaId,
        interruption_threshold_seconds: f64,
        filler_tolerance_ratio: f64,
    ) -> Result<Self> {
        ensure!(
            interruption_threshold_seconds.is_finite() && interruption_threshold_seconds > 0.0,
            "interruption threshold must be a positive number of seconds, got {}",
            interruption_threshold_seconds
        );
        ensure!(
            (0.0..=1.0).contains(&filler_tolerance_ratio),
            "filler tolerance must be within [0, 1], got {}",
            filler_tolerance_ratio
        );

        Ok(Self {
            id,
            interruption_threshold_seconds,
            filler_tolerance_ratio,
        })
    }

    pub fn default_for(id: PersonaId) -> Self {
        let (interruption_threshold_seconds, filler_tolerance_ratio) = id.defaults();
        Self {
            id,
            interruption_threshold_seconds,
            filler_tolerance_ratio,
        }
    }

    /// Build a persona from optional overrides, falling back to the id's defaults
    pub fn with_overrides(
        id: PersonaId,
        interruption_threshold_seconds: Option<f64>,
        filler_tolerance_ratio: Option<f64>,
    ) -> Result<Self> {
        let (threshold, tolerance) = id.defaults();
        Self::new(
            id,
            interruption_threshold_seconds.unwrap_or(threshold),
            filler_tolerance_ratio.unwrap_or(tolerance),
        )
    }
}

impl Default for Persona {
    fn default() -> Self {
        Self::default_for(PersonaId::Standard)
    }
}
