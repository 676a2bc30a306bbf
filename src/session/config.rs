use crate::persona::Persona;
use serde::{Deserialize, Serialize};

/// Configuration for a speech session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Unique session identifier (e.g., the conversation room name)
    pub session_id: String,

    /// Persona applied to every utterance in this session
    pub persona: Persona,
}

impl SessionConfig {
    pub fn new(session_id: impl Into<String>, persona: Persona) -> Self {
        Self {
            session_id: session_id.into(),
            persona,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_id: format!("session-{}", uuid::Uuid::new_v4()),
            persona: Persona::default(),
        }
    }
}
