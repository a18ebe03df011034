//! Generate route — prompt in, model reply out, exchange recorded.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::routes::chats::chat_error_response;
use crate::routes::{ApiError, error_body};
use crate::services::ai::{self, AiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    pub chat_id: Option<u64>,
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub response: String,
}

/// `POST /api/generate` — generate a reply and append the exchange.
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let prompt = body.prompt.filter(|prompt| !prompt.is_empty());
    let (Some(chat_id), Some(prompt)) = (body.chat_id, prompt) else {
        return Err(error_body(StatusCode::BAD_REQUEST, "missing chatId or prompt"));
    };

    let response = ai::handle_prompt(&state, chat_id, &prompt)
        .await
        .map_err(ai_error_response)?;
    Ok(Json(GenerateResponse { response }))
}

fn ai_error_response(err: AiError) -> ApiError {
    match err {
        AiError::LlmNotConfigured => error_body(StatusCode::SERVICE_UNAVAILABLE, "generation not configured"),
        AiError::Llm(e) => {
            error!(error = %e, "generation failed");
            error_body(StatusCode::BAD_GATEWAY, "generation failed")
        }
        AiError::Chat(e) => chat_error_response(e),
    }
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
