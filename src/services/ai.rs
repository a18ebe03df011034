//! AI service — user prompt → model reply → recorded exchange.
//!
//! DESIGN
//! ======
//! Wraps the user prompt in a fixed tutoring preamble (priming turns that
//! teach the model its answer-then-explain format), sends it through the
//! configured provider, and appends the (user, ai) pair to the chat's
//! history. The exchange is recorded only after a successful generation:
//! a failed model call leaves the store untouched.

use std::sync::Arc;

use tracing::info;

use crate::llm::LlmGenerate;
use crate::llm::types::{LlmError, PromptPart};
use crate::state::AppState;

// Priming turns sent ahead of every user prompt. The `input:`/`output:`
// prefixes are part of the few-shot format the model is steered with.
const PRIMING_ROLE: &str = "input: you are an intelligent education model who helps students learn better.";
const PRIMING_ROLE_ACK: &str = "output: I am an educational tool designed to help students understand concepts, solve problems, and develop their knowledge. I'll provide clear explanations and guide you through learning step by step.\n\nHow can I assist with your learning today?";
const PRIMING_FORMAT: &str = "input: whenever a question is asked to you, you should first give the correct answer to it, and then you should explain how you arrived at that answer using bullet points";
const PRIMING_FORMAT_ACK: &str = "output: I'll follow this format for all questions:\n1. First, I'll provide the direct answer\n2. Then, I'll explain my reasoning using clear bullet points\n\nWhat would you like to learn about?";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("LLM not configured")]
    LlmNotConfigured,
    #[error("generation failed: {0}")]
    Llm(#[from] LlmError),
    #[error("chat store error: {0}")]
    Chat(#[from] super::chat::ChatError),
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Generate a reply for `prompt` and record the exchange in chat `chat_id`.
/// Returns the reply text.
///
/// # Errors
///
/// `LlmNotConfigured` when the server runs without a provider, `Llm` on a
/// failed model call, `Chat` when the chat is unknown or the exchange
/// cannot be persisted. Nothing is retried here; the caller decides
/// whether to retry or report.
pub async fn handle_prompt(state: &AppState, chat_id: u64, prompt: &str) -> Result<String, AiError> {
    let llm: &Arc<dyn LlmGenerate> = state.llm.as_ref().ok_or(AiError::LlmNotConfigured)?;

    let parts = build_prompt_parts(prompt);
    let reply = llm.generate(&parts).await?;
    info!(
        chat_id,
        model = %reply.model,
        input_tokens = reply.input_tokens,
        output_tokens = reply.output_tokens,
        "generation complete"
    );

    state.store.append_exchange(chat_id, prompt, &reply.text).await?;
    Ok(reply.text)
}

/// The fixed priming turns followed by the user prompt as the final
/// `input:` part.
fn build_prompt_parts(prompt: &str) -> Vec<PromptPart> {
    vec![
        PromptPart::text(PRIMING_ROLE),
        PromptPart::text(PRIMING_ROLE_ACK),
        PromptPart::text(PRIMING_FORMAT),
        PromptPart::text(PRIMING_FORMAT_ACK),
        PromptPart::text(format!("input: {prompt}")),
    ]
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
