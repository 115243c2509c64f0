use super::*;

// =========================================================================
// build_user_prompt
// =========================================================================

#[test]
fn single_topic_prompt() {
    let prompt = build_user_prompt(&TopicPair::new("dragons", ""));
    assert!(prompt.contains("\"dragons\""));
    assert!(!prompt.contains(" and "));
}

#[test]
fn second_topic_alone_is_used() {
    let prompt = build_user_prompt(&TopicPair::new(" ", "  ay ışığı "));
    assert!(prompt.contains("\"ay ışığı\""));
}

#[test]
fn two_topic_prompt_mentions_both() {
    let prompt = build_user_prompt(&TopicPair::new("kedi", "uzay"));
    assert!(prompt.contains("\"kedi\""));
    assert!(prompt.contains("\"uzay\""));
}

#[test]
fn system_prompt_demands_json() {
    assert!(SYSTEM_PROMPT.contains("\"title\""));
    assert!(SYSTEM_PROMPT.contains("\"story\""));
}

// =========================================================================
// parse_story_payload
// =========================================================================

#[test]
fn parses_bare_json() {
    let (title, story) = parse_story_payload(r#"{"title":"The Last Dragon","story":"Once..."}"#).unwrap();
    assert_eq!(title, "The Last Dragon");
    assert_eq!(story, "Once...");
}

#[test]
fn parses_fenced_json() {
    let text = "```json\n{\"title\": \"Ay Kedisi\", \"story\": \"Bir varmış...\"}\n```";
    let (title, _) = parse_story_payload(text).unwrap();
    assert_eq!(title, "Ay Kedisi");
}

#[test]
fn parses_json_surrounded_by_prose() {
    let text = "Here is your tale:\n{\"title\": \"T\", \"story\": \"S\"}\nEnjoy!";
    assert_eq!(parse_story_payload(text).unwrap(), ("T".to_string(), "S".to_string()));
}

#[test]
fn trims_fields() {
    let (title, story) = parse_story_payload(r#"{"title":"  T ","story":"\n S \n"}"#).unwrap();
    assert_eq!(title, "T");
    assert_eq!(story, "S");
}

#[test]
fn no_json_is_parse_error() {
    let err = parse_story_payload("I cannot help with that.").unwrap_err();
    assert!(matches!(err, LlmError::StoryParse(_)));
}

#[test]
fn malformed_json_is_parse_error() {
    let err = parse_story_payload("{\"title\": \"T\", ").unwrap_err();
    assert!(matches!(err, LlmError::StoryParse(_)));
}

#[test]
fn blank_story_is_empty_error() {
    let err = parse_story_payload(r#"{"title":"T","story":"   "}"#).unwrap_err();
    assert!(matches!(err, LlmError::EmptyStory));
}

#[test]
fn missing_title_is_empty_error() {
    let err = parse_story_payload(r#"{"story":"S"}"#).unwrap_err();
    assert!(matches!(err, LlmError::EmptyStory));
}

#[test]
fn literal_newlines_inside_story_are_tolerated() {
    let text = "{\"title\": \"Ay Kedisi\", \"story\": \"Bir varmış.\n\nBir yokmuş.\"}";
    let (title, story) = parse_story_payload(text).unwrap();
    assert_eq!(title, "Ay Kedisi");
    assert_eq!(story, "Bir varmış.\n\nBir yokmuş.");
}

#[test]
fn literal_tabs_and_crlf_inside_story_are_tolerated() {
    let text = "```json\n{\n  \"title\": \"T\",\n  \"story\": \"a\r\n\tb \\\"quoted\\\"\"\n}\n```";
    let (_, story) = parse_story_payload(text).unwrap();
    assert_eq!(story, "a\r\n\tb \"quoted\"");
}

#[test]
fn escaping_leaves_structure_whitespace_alone() {
    let json = "{\n\"a\": \"x\ny\",\n\"b\": \"\\\\\"\n}";
    assert_eq!(escape_control_chars_in_strings(json), "{\n\"a\": \"x\\ny\",\n\"b\": \"\\\\\"\n}");
}

#[test]
fn system_prompt_asks_for_escaped_paragraph_breaks() {
    assert!(SYSTEM_PROMPT.contains("\\n\\n"));
}
