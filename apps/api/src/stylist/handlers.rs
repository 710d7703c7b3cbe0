use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::quiz::axis::RawTriple;
use crate::state::AppState;
use crate::stylist::rules::{ordered_active, Category, QuickQuestion};
use crate::stylist::session::{ChatMessage, SessionSnapshot};

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Chat session {id} not found"))
}

/// GET /api/v1/stylist/quick-questions
pub async fn handle_quick_questions(State(state): State<AppState>) -> Json<Vec<QuickQuestion>> {
    let store = state.store.read().await;
    Json(ordered_active(&store.quick_questions))
}

/// POST /api/v1/stylist/sessions
pub async fn handle_open_session(
    State(state): State<AppState>,
    Json(raw): Json<RawTriple>,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let triple = raw.validate_or_default();
    let (greeting, typing) = {
        let store = state.store.read().await;
        (
            store.settings.default_greeting.clone(),
            store.settings.enable_typing_indicator,
        )
    };
    let id = state.sessions.open(triple, Some(greeting)).await;
    let snapshot = state
        .sessions
        .snapshot(id, typing)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// GET /api/v1/stylist/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let typing = state.store.read().await.settings.enable_typing_indicator;
    state
        .sessions
        .snapshot(id, typing)
        .await
        .map(Json)
        .ok_or_else(|| session_not_found(id))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[serde(default)]
    pub text: Option<String>,
    /// Sends the quick question's text with its category instead of free text.
    #[serde(default)]
    pub quick_question_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub message: ChatMessage,
    /// When the reply is expected, from now.
    pub reply_delay_ms: u64,
}

/// POST /api/v1/stylist/sessions/:id/messages
///
/// Appends the user message right away and schedules the stylist's reply.
/// A reply still pending from an earlier message is dropped.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>), AppError> {
    let triple = state
        .sessions
        .triple(id)
        .await
        .ok_or_else(|| session_not_found(id))?;

    let store = state.store.read().await;

    let (text, category): (String, Option<Category>) = match req.quick_question_id {
        Some(qid) => {
            let question = store
                .quick_questions
                .iter()
                .find(|q| q.id == qid && q.active)
                .ok_or_else(|| AppError::NotFound(format!("Quick question {qid} not found")))?;
            (question.text.clone(), Some(question.category))
        }
        None => {
            let text = req.text.unwrap_or_default();
            if text.trim().is_empty() {
                return Err(AppError::Validation(
                    "message text cannot be empty".to_string(),
                ));
            }
            (text.trim().to_string(), None)
        }
    };

    let reply = state.stylist.reply(&store, &text, category, triple).await;
    let jitter_bound = usize::try_from(store.settings.response_jitter_ms)
        .unwrap_or(usize::MAX)
        .saturating_add(1);
    let delay_ms = store
        .settings
        .response_delay_ms
        .saturating_add(state.rng.below(jitter_bound) as u64);
    drop(store);

    let pending = state
        .sessions
        .submit(id, &text)
        .await
        .ok_or_else(|| session_not_found(id))?;
    state
        .sessions
        .schedule(&pending, Duration::from_millis(delay_ms), reply);

    info!(session_id = %id, generation = pending.generation, delay_ms, "Stylist reply scheduled");

    Ok((
        StatusCode::ACCEPTED,
        Json(SendMessageResponse {
            message: pending.user_message,
            reply_delay_ms: delay_ms,
        }),
    ))
}

/// DELETE /api/v1/stylist/sessions/:id
pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.close(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(session_not_found(id))
    }
}
