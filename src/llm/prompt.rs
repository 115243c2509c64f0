//! Prompt construction and story payload parsing shared by all providers.
//!
//! Grounded search tools cannot be combined with a structured response schema,
//! so the model is asked for a bare JSON object in its text and the parser
//! tolerates code fences or stray prose around it.

use std::fmt::Write;

use serde::Deserialize;

use super::types::LlmError;
use crate::story::TopicPair;

pub const SYSTEM_PROMPT: &str = "You are a gentle storyteller who writes short fairy tales (masallar) \
for children aged 5 to 10. Research the given topics with web search so any facts woven into the tale \
are accurate. Write in Turkish. Keep the tale warm, imaginative and free of violence, around 400 to 600 \
words, with a clear beginning, middle and end and a light moral. \
Respond with ONLY a JSON object of the form {\"title\": \"...\", \"story\": \"...\"}. \
Separate paragraphs in \"story\" with the escaped sequence \\n\\n; never put raw line breaks inside \
JSON strings. Do not add commentary outside the JSON.";

/// Build the user turn for the given topics. Assumes at least one is non-empty.
#[must_use]
pub fn build_user_prompt(topics: &TopicPair) -> String {
    let listed: Vec<&str> = topics.non_empty().collect();
    match listed.as_slice() {
        [only] => format!("Write a fairy tale about this topic: \"{only}\"."),
        [a, b] => format!("Write a fairy tale that brings these two topics together: \"{a}\" and \"{b}\"."),
        _ => "Write a fairy tale about a topic of your choice.".to_string(),
    }
}

#[derive(Deserialize)]
struct StoryPayload {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    story: Option<String>,
}

/// Extract `(title, story)` from the model's text output.
///
/// # Errors
///
/// Returns [`LlmError::StoryParse`] when no JSON object can be decoded and
/// [`LlmError::EmptyStory`] when the title or story is blank.
pub fn parse_story_payload(text: &str) -> Result<(String, String), LlmError> {
    let json = extract_json_object(text).ok_or_else(|| LlmError::StoryParse("no JSON object in model output".into()))?;
    let payload: StoryPayload = match serde_json::from_str(json) {
        Ok(payload) => payload,
        Err(strict) => serde_json::from_str(&escape_control_chars_in_strings(json))
            .map_err(|_| LlmError::StoryParse(strict.to_string()))?,
    };

    let title = payload.title.unwrap_or_default().trim().to_string();
    let story = payload.story.unwrap_or_default().trim().to_string();
    if title.is_empty() || story.is_empty() {
        return Err(LlmError::EmptyStory);
    }
    Ok((title, story))
}

/// Slice from the first `{` to the last `}`; covers fenced and prose-wrapped output.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Escape raw control characters inside JSON string literals. Models often
/// emit literal line breaks in long string values, which strict JSON rejects.
fn escape_control_chars_in_strings(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;
    for c in json.chars() {
        if !in_string {
            in_string = c == '"';
            out.push(c);
            continue;
        }
        if escaped {
            escaped = false;
            out.push(c);
            continue;
        }
        match c {
            '\\' => {
                escaped = true;
                out.push(c);
            }
            '"' => {
                in_string = false;
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if u32::from(c) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
