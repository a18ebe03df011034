//! Chat CRUD routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::routes::{ApiError, error_body};
use crate::services::chat::{Chat, ChatError, Message};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChatResponse {
    pub chat_id: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameChatBody {
    pub new_name: Option<String>,
}

/// `POST /api/chat/new` — create a chat with a default name.
pub async fn create_chat(State(state): State<AppState>) -> Result<Json<CreateChatResponse>, ApiError> {
    let chat = state
        .store
        .create_chat()
        .await
        .map_err(chat_error_response)?;
    Ok(Json(CreateChatResponse { chat_id: chat.id }))
}

/// `GET /api/chats` — list all chats in creation order.
pub async fn list_chats(State(state): State<AppState>) -> Json<Vec<Chat>> {
    Json(state.store.list_chats().await)
}

/// `GET /api/messages/{chat_id}` — messages for one chat, possibly empty.
pub async fn get_messages(State(state): State<AppState>, Path(chat_id): Path<u64>) -> Json<Vec<Message>> {
    Json(state.store.get_messages(chat_id).await)
}

/// `PUT /api/chat/rename/{chat_id}` — rename a chat.
pub async fn rename_chat(
    State(state): State<AppState>,
    Path(chat_id): Path<u64>,
    Json(body): Json<RenameChatBody>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let new_name = body.new_name.unwrap_or_default();
    state
        .store
        .rename_chat(chat_id, &new_name)
        .await
        .map_err(chat_error_response)?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// `DELETE /api/chat/delete/{chat_id}` — delete a chat and its messages.
pub async fn delete_chat(
    State(state): State<AppState>,
    Path(chat_id): Path<u64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state
        .store
        .delete_chat(chat_id)
        .await
        .map_err(chat_error_response)?;
    Ok(Json(serde_json::json!({ "success": true })))
}

/// Translate a store error into a status + short message. Persistence
/// detail is logged here and crosses the boundary as a generic message.
pub(crate) fn chat_error_response(err: ChatError) -> ApiError {
    match err {
        ChatError::NotFound(_) => error_body(StatusCode::NOT_FOUND, err.to_string()),
        ChatError::InvalidArgument(_) => error_body(StatusCode::BAD_REQUEST, err.to_string()),
        ChatError::Persistence(e) => {
            error!(error = %e, "storage persistence failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "storage failure")
        }
    }
}

#[cfg(test)]
#[path = "chats_test.rs"]
mod tests;
