//! Anthropic Messages API client with the server-side web search tool.
//!
//! Thin HTTP wrapper for `/v1/messages`. Citations come from
//! `web_search_result_location` entries on text blocks, then from the raw
//! `web_search_tool_result` blocks. Pure parsing in `parse_response` for
//! testability.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

use super::config::LlmTimeouts;
use super::prompt::parse_story_payload;
use super::types::LlmError;
use crate::story::{GeneratedStory, Source, dedupe_sources};

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const WEB_SEARCH_MAX_USES: u32 = 5;

// =============================================================================
// CLIENT
// =============================================================================

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key })
    }

    pub async fn generate(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        prompt: &str,
    ) -> Result<GeneratedStory, LlmError> {
        let body = build_request(model, max_tokens, system, prompt);

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
            warn!(status, body = %text, "anthropic: non-success response");
            return Err(LlmError::api_response(status, text));
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [ApiMessage<'a>; 1],
    tools: [WebSearchTool; 1],
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct WebSearchTool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    name: &'static str,
    max_uses: u32,
}

fn build_request<'a>(model: &'a str, max_tokens: u32, system: &'a str, prompt: &'a str) -> ApiRequest<'a> {
    ApiRequest {
        model,
        max_tokens,
        system,
        messages: [ApiMessage { role: "user", content: prompt }],
        tools: [WebSearchTool { tool_type: "web_search_20250305", name: "web_search", max_uses: WEB_SEARCH_MAX_USES }],
    }
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ResponseBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum ResponseBlock {
    #[serde(rename = "text")]
    Text {
        text: String,
        #[serde(default)]
        citations: Option<Vec<Citation>>,
    },

    /// `content` is an array of results on success, an error object otherwise.
    #[serde(rename = "web_search_tool_result")]
    WebSearchResult {
        #[serde(default)]
        content: Value,
    },

    /// Server tool calls, thinking, and anything newer.
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize)]
struct Citation {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<GeneratedStory, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let mut text = String::new();
    let mut cited = Vec::new();
    let mut searched = Vec::new();

    for block in api.content {
        match block {
            ResponseBlock::Text { text: t, citations } => {
                text.push_str(&t);
                cited.extend(
                    citations
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|c| Some(Source::new(c.url?, c.title.unwrap_or_default()))),
                );
            }
            ResponseBlock::WebSearchResult { content } => searched.extend(search_results(&content)),
            ResponseBlock::Unknown => {}
        }
    }

    if text.trim().is_empty() {
        let reason = api.stop_reason.unwrap_or_else(|| "unknown".into());
        return Err(LlmError::NoContent(format!("no text blocks (stop reason {reason})")));
    }

    let (title, story) = parse_story_payload(&text)?;
    Ok(GeneratedStory { title, story, sources: dedupe_sources(cited.into_iter().chain(searched)) })
}

fn search_results(content: &Value) -> Vec<Source> {
    let Some(items) = content.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter(|item| item.get("type").and_then(Value::as_str) == Some("web_search_result"))
        .filter_map(|item| {
            let url = item.get("url").and_then(Value::as_str)?;
            let title = item.get("title").and_then(Value::as_str).unwrap_or_default();
            Some(Source::new(url, title))
        })
        .collect()
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
