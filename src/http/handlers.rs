use super::state::AppState;
use crate::analysis::AnalysisResult;
use crate::driver::ConversationDriver;
use crate::persona::{Persona, PersonaId, PersonaPolicy};
use crate::session::{ResponseRecord, SessionConfig, SessionStats, SpeechSession};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// Optional session ID (if not provided, generate UUID)
    pub session_id: Option<String>,

    /// Persona id (default: standard; unknown ids fall back to standard)
    pub persona: Option<String>,

    /// Overrides the persona's default interruption threshold
    pub interruption_threshold_seconds: Option<f64>,

    /// Overrides the persona's default filler tolerance
    pub filler_tolerance_ratio: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub persona: Persona,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptUpdateRequest {
    /// Cumulative transcript of the current utterance
    #[serde(default)]
    pub transcript: String,
    pub is_speaking: bool,
}

#[derive(Debug, Serialize)]
pub struct TranscriptUpdateResponse {
    /// Whether this update ended an utterance
    pub finalized: bool,
    pub analysis: Option<AnalysisResult>,
    pub interruption_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: String,
    pub duration_seconds: f64,
    pub persona: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub persona: Persona,
    pub analysis: AnalysisResult,
    pub interruption_message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EndSessionResponse {
    pub session_id: String,
    pub status: String,
    pub stats: SessionStats,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

fn session_not_found(session_id: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        format!("Session {} not found", session_id),
    )
}

fn resolve_persona_id(requested: Option<&str>) -> PersonaId {
    match requested {
        None => PersonaId::default(),
        Some(raw) => PersonaId::parse(raw).unwrap_or_else(|| {
            warn!("Unknown persona '{}', using {}", raw, PersonaId::default());
            PersonaId::default()
        }),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /sessions
/// Start tracking a new conversation
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> impl IntoResponse {
    // Generate or use provided session ID
    let session_id = req
        .session_id
        .unwrap_or_else(|| format!("session-{}", uuid::Uuid::new_v4()));

    let persona_id = resolve_persona_id(req.persona.as_deref());
    let persona = match Persona::with_overrides(
        persona_id,
        req.interruption_threshold_seconds,
        req.filler_tolerance_ratio,
    ) {
        Ok(persona) => persona,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let session = SpeechSession::new(
        SessionConfig::new(session_id.clone(), persona),
        Arc::clone(&state.analyzer),
    );
    let driver = ConversationDriver::new(session, Arc::clone(&state.sink));

    if let Err(e) = state.sessions.insert(driver).await {
        return error_response(StatusCode::CONFLICT, e.to_string());
    }

    info!("Session {} started (persona={})", session_id, persona.id);

    (
        StatusCode::OK,
        Json(CreateSessionResponse {
            session_id: session_id.clone(),
            persona,
            status: "active".to_string(),
            message: format!("Session {} started", session_id),
        }),
    )
        .into_response()
}

/// POST /sessions/:session_id/updates
/// Feed a transcript / voice-activity update into a session
pub async fn post_update(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<TranscriptUpdateRequest>,
) -> impl IntoResponse {
    let Some(driver) = state.sessions.get(&session_id).await else {
        return session_not_found(&session_id);
    };

    let mut driver = driver.lock().await;
    match driver.handle_update(&req.transcript, req.is_speaking).await {
        Ok(outcome) => {
            let response = match outcome {
                Some(outcome) => TranscriptUpdateResponse {
                    finalized: true,
                    interruption_message: outcome.notice.map(|n| n.message),
                    analysis: Some(outcome.analysis),
                },
                None => TranscriptUpdateResponse {
                    finalized: false,
                    analysis: None,
                    interruption_message: None,
                },
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to handle update for {}: {:#}", session_id, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to handle update: {}", e),
            )
        }
    }
}

/// GET /sessions/:session_id/status
pub async fn get_session_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.sessions.get(&session_id).await {
        Some(driver) => {
            let stats = driver.lock().await.session().stats();
            (StatusCode::OK, Json(stats)).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// GET /sessions/:session_id/history
/// Annotated transcript of every finalized utterance so far
pub async fn get_session_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.sessions.get(&session_id).await {
        Some(driver) => {
            let history: Vec<ResponseRecord> = driver.lock().await.session().history().to_vec();
            (StatusCode::OK, Json(history)).into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// DELETE /sessions/:session_id
/// End a conversation and return its final statistics
pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    match state.sessions.remove(&session_id).await {
        Some(driver) => {
            let stats = driver.lock().await.session().stats();
            info!(
                "Session {} ended ({} responses, {} interruptions)",
                session_id, stats.responses_count, stats.interruptions_count
            );
            (
                StatusCode::OK,
                Json(EndSessionResponse {
                    session_id,
                    status: "ended".to_string(),
                    stats,
                }),
            )
                .into_response()
        }
        None => session_not_found(&session_id),
    }
}

/// POST /analyze
/// One-shot analysis of a finished utterance with persona defaults
pub async fn analyze_utterance(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let persona = Persona::default_for(resolve_persona_id(req.persona.as_deref()));
    let analysis = state
        .analyzer
        .analyze(&req.text, req.duration_seconds, &persona);
    let interruption_message = analysis
        .should_interrupt
        .then(|| PersonaPolicy::message_for(persona.id, analysis.interruption_reason).to_string());

    (
        StatusCode::OK,
        Json(AnalyzeResponse {
            persona,
            analysis,
            interruption_message,
        }),
    )
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
