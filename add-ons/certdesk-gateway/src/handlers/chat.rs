//! Chat handlers: one conversation log per session, answers from the query resolver.
//!
//! The question and its answer are appended under a single session entry guard, so
//! concurrent posts to one session never interleave. The optional reply delay runs after
//! that and only holds back the HTTP response.

use super::{api_error, ApiError};
use crate::AppState;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use certdesk_core::ConversationMessage;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub(crate) struct ChatRequest {
    /// Continue an existing session; omit to start a new one.
    #[serde(default)]
    pub(crate) session_id: Option<Uuid>,
    pub(crate) message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatResponse {
    pub(crate) session_id: Uuid,
    pub(crate) rule: String,
    pub(crate) reply: ConversationMessage,
}

fn session_not_found(id: Uuid) -> ApiError {
    api_error(StatusCode::NOT_FOUND, format!("unknown session {}", id))
}

/// POST /v1/chat
pub(crate) async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if req.message.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "message must not be empty"));
    }
    let max = state.config.max_query_chars;
    if req.message.chars().count() > max {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            format!("message exceeds {} characters", max),
        ));
    }

    let session_id = match req.session_id {
        Some(id) if state.sessions.contains(&id) => id,
        Some(id) => return Err(session_not_found(id)),
        None => {
            let id = state.sessions.open().ok_or_else(|| {
                api_error(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "too many open chat sessions, try again later",
                )
            })?;
            tracing::info!(target: "certdesk::gateway", session = %id, "chat session started");
            id
        }
    };

    let (rule, reply) = state
        .sessions
        .with_log(&session_id, |log| {
            log.push_user(req.message.as_str());
            let resolution = state.resolver.resolve_detailed(&req.message);
            let reply = log.push_assistant(resolution.text).clone();
            (resolution.rule, reply)
        })
        .ok_or_else(|| session_not_found(session_id))?;
    tracing::debug!(
        target: "certdesk::gateway",
        session = %session_id,
        rule = %rule,
        "chat query resolved"
    );

    if state.config.reply_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(state.config.reply_delay_ms)).await;
    }

    Ok(Json(ChatResponse {
        session_id,
        rule,
        reply,
    }))
}

/// GET /v1/chat/:session_id
pub(crate) async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Vec<ConversationMessage>>, ApiError> {
    state
        .sessions
        .messages(&session_id)
        .map(Json)
        .ok_or_else(|| session_not_found(session_id))
}

/// DELETE /v1/chat/:session_id – ends the session; its log is dropped.
pub(crate) async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.sessions.close(&session_id) {
        return Err(session_not_found(session_id));
    }
    tracing::info!(target: "certdesk::gateway", session = %session_id, "chat session ended");
    Ok(StatusCode::NO_CONTENT)
}
