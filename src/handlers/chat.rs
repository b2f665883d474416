use axum::{extract::Extension, Json};
use std::sync::Arc;
use tracing::info;

use crate::models::{ChatRequest, ChatResponse, ClearRequest, ClearResponse};
use crate::services::ChatService;
use crate::utils::error::ApiError;

pub async fn chat_handler(
    Extension(chat_service): Extension<Arc<ChatService>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = match request.message.as_deref() {
        Some(m) if !m.is_empty() => m,
        _ => return Err(ApiError::BadRequest("Message is required".to_string())),
    };

    info!(
        "Chat request: session={}, message_len={}",
        request.session_id.as_deref().unwrap_or("<none>"),
        message.len()
    );

    let reply = chat_service
        .handle_message(request.session_id.as_deref(), message)
        .await?;

    Ok(Json(ChatResponse {
        reply: reply.reply,
        timestamp: reply.timestamp,
    }))
}

pub async fn clear_handler(
    Extension(chat_service): Extension<Arc<ChatService>>,
    Json(request): Json<ClearRequest>,
) -> Json<ClearResponse> {
    chat_service.clear_session(request.session_id.as_deref());

    Json(ClearResponse {
        ok: true,
        error: None,
    })
}
