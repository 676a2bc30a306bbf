//! Moderator personas
//!
//! A persona fixes how strict the moderator is for a whole session:
//! - Interruption threshold and filler tolerance (`Persona`)
//! - Which signals trigger an interruption, in which order (`PersonaPolicy::decide`)
//! - What the moderator says when it cuts in (`PersonaPolicy::message_for`)

mod persona;
mod policy;

pub use persona::{DecisionRule, Persona, PersonaId};
pub use policy::{FillerThresholdMode, PersonaPolicy, UtteranceSignals};
