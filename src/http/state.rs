use crate::analysis::UtteranceAnalyzer;
use crate::driver::{InterruptionSink, SessionRegistry, TracingSink};
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Live conversations (session_id → driver)
    pub sessions: SessionRegistry,

    /// Scoring engine shared by every session
    pub analyzer: Arc<UtteranceAnalyzer>,

    /// Where new sessions deliver their interruptions
    pub sink: Arc<dyn InterruptionSink>,
}

impl AppState {
    pub fn new(analyzer: Arc<UtteranceAnalyzer>, sink: Arc<dyn InterruptionSink>) -> Self {
        Self {
            sessions: SessionRegistry::new(),
            analyzer,
            sink,
        }
    }

    /// State whose interruptions are only logged
    pub fn with_tracing_sink(analyzer: Arc<UtteranceAnalyzer>) -> Self {
        Self::new(analyzer, Arc::new(TracingSink))
    }
}
