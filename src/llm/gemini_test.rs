use super::*;

fn make_response(text: &str, chunks: serde_json::Value) -> String {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP",
            "groundingMetadata": {
                "webSearchQueries": ["dragons folklore"],
                "groundingChunks": chunks
            }
        }],
        "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 480 },
        "modelVersion": "gemini-2.5-flash"
    })
    .to_string()
}

#[test]
fn request_shape_enables_search_grounding() {
    let body = serde_json::to_value(build_request(512, "sys", "tell me")).unwrap();
    assert_eq!(body["contents"][0]["role"], "user");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "tell me");
    assert_eq!(body["systemInstruction"]["parts"][0]["text"], "sys");
    assert!(body["systemInstruction"].get("role").is_none());
    assert!(body["tools"][0]["google_search"].is_object());
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 512);
}

#[test]
fn parse_story_with_sources() {
    let json = make_response(
        r#"{"title":"The Last Dragon","story":"Once upon a time..."}"#,
        serde_json::json!([
            { "web": { "uri": "https://a.test", "title": "a.test" } },
            { "web": { "uri": "https://b.test", "title": "b.test" } }
        ]),
    );
    let story = parse_response(&json).unwrap();
    assert_eq!(story.title, "The Last Dragon");
    assert_eq!(story.story, "Once upon a time...");
    assert_eq!(story.sources, vec![Source::new("https://a.test", "a.test"), Source::new("https://b.test", "b.test")]);
}

#[test]
fn parse_joins_split_text_parts() {
    let json = serde_json::json!({
        "candidates": [{
            "content": { "parts": [
                { "text": "```json\n{\"title\": \"Ay\"," },
                { "text": " \"story\": \"Bir varmış\"}\n```" }
            ] }
        }]
    })
    .to_string();
    let story = parse_response(&json).unwrap();
    assert_eq!(story.title, "Ay");
    assert!(story.sources.is_empty());
}

#[test]
fn parse_dedupes_and_skips_non_web_chunks() {
    let json = make_response(
        r#"{"title":"T","story":"S"}"#,
        serde_json::json!([
            { "web": { "uri": "https://a.test", "title": "first" } },
            { "retrievedContext": { "uri": "gs://bucket/doc" } },
            { "web": { "uri": "https://a.test", "title": "dup" } }
        ]),
    );
    let story = parse_response(&json).unwrap();
    assert_eq!(story.sources.len(), 1);
    assert_eq!(story.sources[0].title, "first");
}

#[test]
fn parse_blocked_prompt() {
    let json = serde_json::json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::NoContent(ref m) if m.contains("SAFETY")));
}

#[test]
fn parse_no_candidates() {
    let err = parse_response("{}").unwrap_err();
    assert!(matches!(err, LlmError::NoContent(_)));
}

#[test]
fn parse_empty_candidate_reports_finish_reason() {
    let json = serde_json::json!({ "candidates": [{ "finishReason": "MAX_TOKENS" }] }).to_string();
    let err = parse_response(&json).unwrap_err();
    assert!(err.to_string().contains("MAX_TOKENS"));
}

#[test]
fn parse_invalid_json() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}

#[test]
fn parse_non_json_story_text() {
    let json = make_response("Sorry, I can't write that.", serde_json::json!([]));
    let err = parse_response(&json).unwrap_err();
    assert!(matches!(err, LlmError::StoryParse(_)));
}
