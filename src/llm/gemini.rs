//! Gemini `generateContent` client with Google Search grounding.
//!
//! Thin HTTP wrapper for `/models/{model}:generateContent`. Citations come
//! from `groundingMetadata.groundingChunks[].web`. Pure parsing in
//! `parse_response` for testability.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use super::config::LlmTimeouts;
use super::prompt::parse_story_payload;
use super::types::LlmError;
use crate::story::{GeneratedStory, Source, dedupe_sources};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    pub async fn generate(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        prompt: &str,
    ) -> Result<GeneratedStory, LlmError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let body = build_request(max_tokens, system, prompt);

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
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
            warn!(status, body = %text, "gemini: non-success response");
            return Err(LlmError::api_response(status, text));
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiRequest<'a> {
    contents: Vec<ApiContent<'a>>,
    system_instruction: ApiContent<'a>,
    tools: Vec<ApiTool>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct ApiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<ApiPart<'a>>,
}

#[derive(Serialize)]
struct ApiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct ApiTool {
    google_search: EmptyObject,
}

#[derive(Serialize)]
struct EmptyObject {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

fn build_request<'a>(max_tokens: u32, system: &'a str, prompt: &'a str) -> ApiRequest<'a> {
    ApiRequest {
        contents: vec![ApiContent { role: Some("user"), parts: vec![ApiPart { text: prompt }] }],
        system_instruction: ApiContent { role: None, parts: vec![ApiPart { text: system }] },
        tools: vec![ApiTool { google_search: EmptyObject {} }],
        generation_config: GenerationConfig { max_output_tokens: max_tokens },
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebChunk>,
}

#[derive(Deserialize)]
struct WebChunk {
    #[serde(default)]
    uri: String,
    #[serde(default)]
    title: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<GeneratedStory, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    if let Some(reason) = api.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(LlmError::NoContent(format!("prompt blocked: {reason}")));
    }

    let candidate = api
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::NoContent("no candidates".into()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".into());
        return Err(LlmError::NoContent(format!("empty candidate (finish reason {reason})")));
    }

    let (title, story) = parse_story_payload(&text)?;

    let sources = candidate
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .map(|web| Source::new(web.uri, web.title));

    Ok(GeneratedStory { title, story, sources: dedupe_sources(sources) })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
