use super::*;

// =========================================================================
// api_response
// =========================================================================

#[test]
fn gemini_error_body_message_is_displayed() {
    let body = serde_json::json!({
        "error": {
            "code": 400,
            "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT"
        }
    })
    .to_string();
    let err = LlmError::api_response(400, body.clone());
    assert_eq!(err.to_string(), "API response error: status 400: API key not valid. Please pass a valid API key.");
    assert!(matches!(err, LlmError::ApiResponse { status: 400, body: ref b, .. } if *b == body));
}

#[test]
fn anthropic_error_body_message_is_displayed() {
    let body = serde_json::json!({
        "type": "error",
        "error": { "type": "invalid_request_error", "message": "max_tokens: must be positive" }
    })
    .to_string();
    let err = LlmError::api_response(400, body);
    assert!(err.to_string().ends_with(": max_tokens: must be positive"));
}

#[test]
fn non_json_body_falls_back_to_excerpt() {
    let err = LlmError::api_response(502, "  <html>Bad Gateway</html> ".into());
    assert_eq!(err.to_string(), "API response error: status 502: <html>Bad Gateway</html>");
}

#[test]
fn long_body_excerpt_is_truncated() {
    let err = LlmError::api_response(500, "x".repeat(1000));
    let LlmError::ApiResponse { message, .. } = err else { panic!("expected ApiResponse") };
    assert_eq!(message.chars().count(), BODY_EXCERPT_CHARS);
}

#[test]
fn empty_body_still_has_message() {
    let err = LlmError::api_response(503, String::new());
    assert_eq!(err.to_string(), "API response error: status 503: empty response body");
}
