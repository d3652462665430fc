//! HTTP route handlers for the portfolio chat API.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::engine::normalize::NormalizedMessage;
use crate::server::interactions::{InteractionRecord, classify_sentiment, extract_entities};
use crate::server::state::{AppState, SessionId};

/// Messages longer than this are truncated before the engine sees them.
pub const MAX_MESSAGE_CHARS: usize = 500;

/// Reply used when the server itself fails mid-request.
const APOLOGY: &str = "Lo siento, algo salió mal por mi lado. ¿Puedes intentarlo de nuevo?";

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat))
        .route("/api/interactions/recent", get(recent_interactions))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "portfolio-chat",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Chat request.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// The visitor's message.
    pub message: String,
    /// Visitor name, if the frontend knows it.
    pub user_name: Option<String>,
    /// Existing session to continue; omitted on the first message.
    pub session_id: Option<SessionId>,
}

/// Chat response.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    /// The full reply text.
    pub reply: String,
    /// The reply split into display segments.
    pub segments: Vec<String>,
    /// Session to send with the next message.
    pub session_id: SessionId,
}

/// Handle one chat exchange.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    let trimmed = request.message.trim();
    if trimmed.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "message must not be empty".to_string()));
    }

    let message: String = trimmed.chars().take(MAX_MESSAGE_CHARS).collect();
    let session_id = request.session_id.unwrap_or_default();
    let started = Instant::now();

    // Engine call in its own scope: neither the session guard nor the RNG
    // lock may be held across an await.
    let (reply, trace) = {
        let mut session = state.sessions.checkout(session_id);
        let mut rng = match state.rng.lock() {
            Ok(rng) => rng,
            Err(poisoned) => {
                tracing::error!("rng lock poisoned: {poisoned}");
                return Ok(Json(ChatResponse {
                    reply: APOLOGY.to_string(),
                    segments: vec![APOLOGY.to_string()],
                    session_id,
                }));
            }
        };
        state.engine.respond(
            &message,
            request.user_name.as_deref(),
            &mut session.context,
            &mut *rng,
        )
    };

    let processing_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let reply_text = reply.text();

    tracing::info!(
        session = %session_id,
        intent = %trace.intent_label(),
        segments = reply.segments().len(),
        "chat exchange"
    );

    let normalized = NormalizedMessage::new(&message);
    state
        .interactions
        .record(InteractionRecord {
            session_id,
            user_message: message,
            ai_response: reply_text.clone(),
            detected_intent: trace.intent_label(),
            detected_entities: extract_entities(normalized.as_str()),
            timestamp: Utc::now(),
            processing_time_ms,
            user_sentiment: classify_sentiment(normalized.as_str()),
        })
        .await;

    Ok(Json(ChatResponse {
        reply: reply_text,
        segments: reply.segments().to_vec(),
        session_id,
    }))
}

/// Query parameters for the recent-interactions endpoint.
#[derive(Debug, Deserialize)]
pub struct RecentParams {
    /// Maximum records to return.
    pub limit: Option<usize>,
}

/// Return the most recent interactions, newest first.
async fn recent_interactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecentParams>,
) -> impl IntoResponse {
    let limit = params.limit.unwrap_or(20);
    Json(state.interactions.recent(limit).await)
}
