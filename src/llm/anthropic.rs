//! Anthropic Messages API client.
//!
//! Thin HTTP wrapper for `/v1/messages`. The priming parts are joined into
//! a single user turn; non-text response blocks are ignored. Pure parsing
//! in `parse_response` for testability.

use std::time::Duration;

use super::config::{GenerationParams, LlmTimeouts};
use super::types::{GenerateReply, LlmError, PromptPart};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

// =============================================================================
// CLIENT
// =============================================================================

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    max_tokens: u32,
}

impl AnthropicClient {
    /// # Errors
    ///
    /// Returns `LlmError::HttpClientBuild` if the HTTP client cannot be
    /// constructed.
    pub fn new(api_key: String, generation: GenerationParams, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, max_tokens: generation.max_output_tokens })
    }

    /// # Errors
    ///
    /// Returns an [`LlmError`] on a failed request, non-success status, or
    /// unparseable response body.
    pub async fn generate(&self, model: &str, parts: &[PromptPart]) -> Result<GenerateReply, LlmError> {
        let prompt = join_parts(parts);
        let body = ApiRequest {
            model,
            max_tokens: self.max_tokens,
            messages: vec![WireMessage { role: "user", content: &prompt }],
        };

        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

/// Collapse the part sequence into one user turn, preserving part order.
fn join_parts(parts: &[PromptPart]) -> String {
    parts
        .iter()
        .map(|part| part.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<WireMessage<'a>>,
}

#[derive(serde::Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
    model: String,
    usage: Usage,
}

#[derive(serde::Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Unknown,
}

#[derive(serde::Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<GenerateReply, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let text: String = api
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Unknown => None,
        })
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        return Err(LlmError::ApiParse("response carried no text blocks".to_owned()));
    }

    Ok(GenerateReply {
        text,
        model: api.model,
        input_tokens: api.usage.input_tokens,
        output_tokens: api.usage.output_tokens,
    })
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
