use super::*;
use std::sync::Arc;

use crate::llm::LlmGenerate;
use crate::llm::types::{GenerateReply, LlmError, PromptPart};
use crate::services::chat::Sender;
use crate::state::test_helpers;

struct MockLlm {
    reply: Result<String, ()>,
}

#[async_trait::async_trait]
impl LlmGenerate for MockLlm {
    async fn generate(&self, _parts: &[PromptPart]) -> Result<GenerateReply, LlmError> {
        match &self.reply {
            Ok(text) => Ok(GenerateReply {
                text: text.clone(),
                model: "mock".into(),
                input_tokens: 0,
                output_tokens: 0,
            }),
            Err(()) => Err(LlmError::ApiResponse { status: 500, body: "upstream".into() }),
        }
    }
}

fn mock_llm(reply: Result<String, ()>) -> Arc<dyn LlmGenerate> {
    Arc::new(MockLlm { reply })
}

#[tokio::test]
async fn missing_prompt_is_bad_request() {
    let (state, _dir) = test_helpers::test_app_state();
    let body = GenerateBody { chat_id: Some(1), prompt: None };

    let (status, err) = generate(State(state), Json(body)).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err.0.error, "missing chatId or prompt");
}

#[tokio::test]
async fn empty_prompt_is_bad_request() {
    let (state, _dir) = test_helpers::test_app_state();
    let body = GenerateBody { chat_id: Some(1), prompt: Some(String::new()) };

    let (status, _) = generate(State(state), Json(body)).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_chat_id_is_bad_request() {
    let (state, _dir) = test_helpers::test_app_state();
    let body = GenerateBody { chat_id: None, prompt: Some("hi".into()) };

    let (status, _) = generate(State(state), Json(body)).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unconfigured_llm_is_service_unavailable() {
    let (state, _dir) = test_helpers::test_app_state();
    let chat = state.store.create_chat().await.unwrap();
    let body = GenerateBody { chat_id: Some(chat.id), prompt: Some("hi".into()) };

    let (status, _) = generate(State(state), Json(body)).await.unwrap_err();
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
    let (state, _dir) = test_helpers::test_app_state_with_llm(mock_llm(Err(())));
    let chat = state.store.create_chat().await.unwrap();
    let body = GenerateBody { chat_id: Some(chat.id), prompt: Some("hi".into()) };

    let (status, err) = generate(State(state.clone()), Json(body)).await.unwrap_err();
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(err.0.error, "generation failed");
    assert!(state.store.get_messages(chat.id).await.is_empty());
}

#[tokio::test]
async fn unknown_chat_is_not_found() {
    let (state, _dir) = test_helpers::test_app_state_with_llm(mock_llm(Ok("hi there".into())));
    let body = GenerateBody { chat_id: Some(9), prompt: Some("hi".into()) };

    let (status, _) = generate(State(state), Json(body)).await.unwrap_err();
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reply_is_returned_and_recorded() {
    let (state, _dir) = test_helpers::test_app_state_with_llm(mock_llm(Ok("photosynthesis is...".into())));
    let chat = state.store.create_chat().await.unwrap();
    let body = GenerateBody { chat_id: Some(chat.id), prompt: Some("explain photosynthesis".into()) };

    let response = generate(State(state.clone()), Json(body)).await.unwrap();
    assert_eq!(response.0.response, "photosynthesis is...");

    let messages = state.store.get_messages(chat.id).await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[1].content, "photosynthesis is...");
}
