pub mod analysis;
pub mod config;
pub mod driver;
pub mod http;
pub mod nats;
pub mod persona;
pub mod session;

pub use analysis::{AnalysisResult, AnalysisSettings, InterruptionReason, Lexicon, UtteranceAnalyzer};
pub use config::Config;
pub use driver::{ConversationDriver, InterruptionNotice, InterruptionSink, SessionRegistry};
pub use http::{create_router, AppState};
pub use nats::{InterruptionMessage, NatsClient, TranscriptMessage};
pub use persona::{FillerThresholdMode, Persona, PersonaId, PersonaPolicy};
pub use session::{ResponseRecord, SessionConfig, SessionStats, SpeechSession, SpeechState};
