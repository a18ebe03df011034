//! LLM — multi-provider adapter for the generate capability.
//!
//! DESIGN
//! ======
//! The `LlmClient` enum dispatches to Gemini (default) or Anthropic based
//! on `LLM_PROVIDER`. Handlers only see the provider-neutral
//! [`LlmGenerate`] trait, which tests mock.

pub mod anthropic;
pub mod config;
pub mod gemini;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::LlmGenerate;
use types::{GenerateReply, LlmError, PromptPart};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to either Gemini or Anthropic.
///
/// Configured from environment variables by [`LlmClient::from_env`].
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
}

enum LlmProvider {
    Gemini(gemini::GeminiClient),
    Anthropic(anthropic::AnthropicClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables.
    ///
    /// - `LLM_PROVIDER`: "gemini" (default) or "anthropic"
    /// - `GEMINI_API_KEY` / `ANTHROPIC_API_KEY`: key for the chosen provider
    /// - `LLM_MODEL`: model name (e.g. "gemini-pro")
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let model = config.model.clone();
        let inner = match config.provider {
            LlmProviderKind::Gemini => LlmProvider::Gemini(gemini::GeminiClient::new(
                config.api_key,
                config.gemini_base_url,
                config.generation,
                config.timeouts,
            )?),
            LlmProviderKind::Anthropic => LlmProvider::Anthropic(anthropic::AnthropicClient::new(
                config.api_key,
                config.generation,
                config.timeouts,
            )?),
        };
        Ok(Self { inner, model })
    }

    /// Return the configured model name (e.g. `"gemini-pro"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate_inner(&self, parts: &[PromptPart]) -> Result<GenerateReply, LlmError> {
        match &self.inner {
            LlmProvider::Gemini(c) => c.generate(&self.model, parts).await,
            LlmProvider::Anthropic(c) => c.generate(&self.model, parts).await,
        }
    }
}

#[async_trait::async_trait]
impl LlmGenerate for LlmClient {
    async fn generate(&self, parts: &[PromptPart]) -> Result<GenerateReply, LlmError> {
        self.generate_inner(parts).await
    }
}
