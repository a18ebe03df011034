//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the six chat API endpoints and serves the browser client as
//! static files from the public directory. Handlers translate store and
//! gateway error kinds into HTTP statuses with `{"error": msg}` bodies;
//! internal detail (raw I/O errors) stays server-side.

pub mod chats;
pub mod generate;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{delete, get, post, put};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Failure response: a status plus a short `{"error": msg}` body.
pub type ApiError = (StatusCode, Json<ErrorBody>);

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub(crate) fn error_body(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorBody { error: message.into() }))
}

/// API routes + permissive CORS + static browser client.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = ServeDir::new(public_dir()).append_index_html_on_directories(true);

    Router::new()
        .route("/api/chat/new", post(chats::create_chat))
        .route("/api/chats", get(chats::list_chats))
        .route("/api/messages/{chat_id}", get(chats::get_messages))
        .route("/api/chat/rename/{chat_id}", put(chats::rename_chat))
        .route("/api/chat/delete/{chat_id}", delete(chats::delete_chat))
        .route("/api/generate", post(generate::generate))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
        .fallback_service(public)
}

/// Resolve the path to the browser client directory.
fn public_dir() -> PathBuf {
    std::env::var("PUBLIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public"))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
