//! LLM types — provider-neutral generation types and errors.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// REQUEST / REPLY TYPES
// =============================================================================

/// One text segment of a generation request. The priming preamble and the
/// user prompt are each a part; providers map the sequence onto their own
/// wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptPart {
    pub text: String,
}

impl PromptPart {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Reply from a generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReply {
    pub text: String,
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

// =============================================================================
// GENERATE TRAIT
// =============================================================================

/// Provider-neutral async trait for text generation. Enables mocking in
/// tests.
#[async_trait::async_trait]
pub trait LlmGenerate: Send + Sync {
    /// Send a generation request to the LLM provider.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the response is
    /// malformed, or the API key is absent.
    async fn generate(&self, parts: &[PromptPart]) -> Result<GenerateReply, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
