use super::*;

// =============================================================================
// parse_response
// =============================================================================

#[test]
fn parses_text_and_usage() {
    let json = r#"{
        "candidates": [
            { "content": { "parts": [{ "text": "4" }], "role": "model" }, "finishReason": "STOP" }
        ],
        "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 8 },
        "modelVersion": "gemini-pro"
    }"#;

    let reply = parse_response(json, "gemini-pro").unwrap();
    assert_eq!(reply.text, "4");
    assert_eq!(reply.model, "gemini-pro");
    assert_eq!(reply.input_tokens, 120);
    assert_eq!(reply.output_tokens, 8);
}

#[test]
fn joins_multiple_parts() {
    let json = r#"{
        "candidates": [
            { "content": { "parts": [{ "text": "The answer " }, { "text": "is 4." }] } }
        ]
    }"#;

    let reply = parse_response(json, "gemini-pro").unwrap();
    assert_eq!(reply.text, "The answer is 4.");
}

#[test]
fn falls_back_to_requested_model() {
    let json = r#"{ "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }] }"#;
    let reply = parse_response(json, "gemini-1.5-flash").unwrap();
    assert_eq!(reply.model, "gemini-1.5-flash");
    assert_eq!(reply.input_tokens, 0);
    assert_eq!(reply.output_tokens, 0);
}

#[test]
fn no_candidates_is_parse_error() {
    let err = parse_response(r#"{ "candidates": [] }"#, "gemini-pro").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn candidate_without_text_is_parse_error() {
    let json = r#"{ "candidates": [{ "content": { "parts": [] } }] }"#;
    let err = parse_response(json, "gemini-pro").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn invalid_json_is_parse_error() {
    let err = parse_response("not json", "gemini-pro").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn unknown_fields_are_tolerated() {
    let json = r#"{
        "candidates": [
            { "content": { "parts": [{ "text": "ok" }] }, "safetyRatings": [], "index": 0 }
        ],
        "promptFeedback": {}
    }"#;
    assert_eq!(parse_response(json, "gemini-pro").unwrap().text, "ok");
}
