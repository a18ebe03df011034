use super::*;
use crate::llm::types::{GenerateReply, PromptPart};
use crate::services::chat::Sender;
use crate::state::test_helpers;

// =========================================================================
// MockLlm
// =========================================================================

struct MockLlm {
    reply: Result<String, ()>,
}

impl MockLlm {
    fn replying(text: &str) -> Arc<dyn LlmGenerate> {
        Arc::new(Self { reply: Ok(text.to_owned()) })
    }

    fn failing() -> Arc<dyn LlmGenerate> {
        Arc::new(Self { reply: Err(()) })
    }
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
            Err(()) => Err(LlmError::ApiRequest("connection refused".into())),
        }
    }
}

// =========================================================================
// handle_prompt
// =========================================================================

#[tokio::test]
async fn prompt_records_exchange_and_returns_reply() {
    let (state, _dir) = test_helpers::test_app_state_with_llm(MockLlm::replying("2 + 2 = 4"));
    let chat = state.store.create_chat().await.unwrap();

    let reply = handle_prompt(&state, chat.id, "what is 2 + 2?").await.unwrap();
    assert_eq!(reply, "2 + 2 = 4");

    let messages = state.store.get_messages(chat.id).await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[0].content, "what is 2 + 2?");
    assert_eq!(messages[1].sender, Sender::Ai);
    assert_eq!(messages[1].content, "2 + 2 = 4");
}

#[tokio::test]
async fn prompt_without_llm_is_not_configured() {
    let (state, _dir) = test_helpers::test_app_state();
    let chat = state.store.create_chat().await.unwrap();

    let err = handle_prompt(&state, chat.id, "hello").await.unwrap_err();
    assert!(matches!(err, AiError::LlmNotConfigured));
    assert!(state.store.get_messages(chat.id).await.is_empty());
}

#[tokio::test]
async fn generation_failure_records_nothing() {
    let (state, _dir) = test_helpers::test_app_state_with_llm(MockLlm::failing());
    let chat = state.store.create_chat().await.unwrap();

    let err = handle_prompt(&state, chat.id, "hello").await.unwrap_err();
    assert!(matches!(err, AiError::Llm(_)));
    assert!(state.store.get_messages(chat.id).await.is_empty());
}

#[tokio::test]
async fn prompt_for_unknown_chat_is_not_found() {
    let (state, _dir) = test_helpers::test_app_state_with_llm(MockLlm::replying("hi"));

    let err = handle_prompt(&state, 42, "hello").await.unwrap_err();
    assert!(matches!(
        err,
        AiError::Chat(crate::services::chat::ChatError::NotFound(42))
    ));
}

// =========================================================================
// build_prompt_parts
// =========================================================================

#[test]
fn prompt_parts_end_with_user_input() {
    let parts = build_prompt_parts("explain photosynthesis");
    assert_eq!(parts.len(), 5);
    assert_eq!(parts[4].text, "input: explain photosynthesis");
}

#[test]
fn prompt_parts_carry_priming_preamble() {
    let parts = build_prompt_parts("anything");
    assert!(parts[0].text.contains("education model"));
    assert!(parts[1].text.starts_with("output:"));
    assert!(parts[2].text.contains("bullet points"));
    assert!(parts[3].text.starts_with("output:"));
}
