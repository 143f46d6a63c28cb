use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use tracing::debug;

use super::types::{ChatHistoryResponse, ChatRequest, ChatResponse, ChatTurnResponse, MessageResponse};
use crate::{
    AppState,
    ai::ReplySource,
    error::{AppError, AppResult},
};

pub fn chat_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/chat", post(chat))
        .route("/chat/history", get(chat_history).delete(clear_history))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let message = payload.map(|Json(req)| req.message).unwrap_or_default();
    if message.trim().is_empty() {
        return Err(AppError::validation("No message provided"));
    }

    let context = state.pipeline.context().await?;
    let reply = state.responder.respond(&message, &context).await;

    if reply.source == ReplySource::Failure {
        return Err(AppError::Upstream(reply.text));
    }

    debug!(source = reply.source.as_str(), "chat turn answered");
    state.history.record(message, reply.text.clone()).await;

    Ok(Json(ChatResponse {
        response: reply.text,
        source: reply.source.as_str().to_string(),
    }))
}

async fn chat_history(State(state): State<Arc<AppState>>) -> Json<ChatHistoryResponse> {
    let turns = state
        .history
        .turns()
        .await
        .into_iter()
        .map(|turn| ChatTurnResponse {
            user_message: turn.user_message,
            reply: turn.reply,
            created_at: turn.created_at.to_rfc3339(),
        })
        .collect();
    Json(ChatHistoryResponse { turns })
}

async fn clear_history(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    let removed = state.history.clear().await;
    debug!(removed, "chat history cleared");
    Json(MessageResponse::new("Chat history cleared"))
}
