//! HTTP API server for the conversation front end
//!
//! This module provides a REST API for driving moderated sessions:
//! - POST /sessions - Start a session with a persona
//! - POST /sessions/:id/updates - Push a transcript / voice-activity update
//! - GET /sessions/:id/status - Query session statistics
//! - GET /sessions/:id/history - Get the annotated response history
//! - DELETE /sessions/:id - End a session
//! - POST /analyze - Analyze a single utterance
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
