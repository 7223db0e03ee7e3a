//! Conversation endpoints.
//!
//! - `POST /api/chat` — send a message within a session (created on demand)
//! - `POST /api/reset` — restart a session from scratch

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::chatbot::IntakeEngine;
use crate::events::TracingObserver;
use crate::kb::SqliteGateway;

const MAX_MESSAGE_LEN: usize = 2000;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<Uuid>,
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub response: String,
}

/// `POST /api/chat` — run one conversation turn.
///
/// Without a `session_id` a fresh session is created and its id returned;
/// the client sends it back on subsequent turns. An unknown id is a 404 so
/// stale clients notice instead of silently starting over.
pub async fn send(
    State(ctx): State<ApiContext>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty".into()));
    }
    if message.len() > MAX_MESSAGE_LEN {
        return Err(ApiError::BadRequest(format!(
            "Message too long (max {MAX_MESSAGE_LEN} chars)"
        )));
    }

    let session_id = match req.session_id {
        Some(id) => id,
        None => ctx.core.create_session()?,
    };

    let conn = ctx.core.open_db()?;
    let gateway = SqliteGateway::new(&conn);
    let observer = TracingObserver;
    let engine = IntakeEngine::new(&gateway, &gateway, &observer);

    // Holding the registry write lock for the whole turn serializes
    // concurrent messages to the same session.
    let mut sessions = ctx.core.sessions_mut()?;
    let session = sessions
        .get_mut(&session_id)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown session {session_id}")))?;

    let response = engine.handle_message(session, message)?;

    Ok(Json(ChatResponse {
        session_id,
        response,
    }))
}

#[derive(Deserialize)]
pub struct ResetRequest {
    pub session_id: Uuid,
}

/// `POST /api/reset` — restart a consultation. Idempotent: resetting an
/// unknown id simply creates a fresh session under it.
pub async fn reset(
    State(ctx): State<ApiContext>,
    Json(req): Json<ResetRequest>,
) -> Result<StatusCode, ApiError> {
    ctx.core.reset_session(req.session_id)?;
    Ok(StatusCode::NO_CONTENT)
}
