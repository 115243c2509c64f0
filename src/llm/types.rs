//! LLM types — provider-neutral errors and the story generation seam.

use crate::story::{GeneratedStory, TopicPair};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by story generation.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status. `message` is the
    /// provider's `error.message` when present, else a body excerpt.
    #[error("API response error: status {status}: {message}")]
    ApiResponse { status: u16, message: String, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The provider answered without any candidate text, e.g. a blocked prompt.
    #[error("model returned no content: {0}")]
    NoContent(String),

    /// The model text did not contain a JSON story object.
    #[error("story payload parse failed: {0}")]
    StoryParse(String),

    /// The story object was present but its title or body was blank.
    #[error("model returned an empty story")]
    EmptyStory,

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// Opaque failure carrying whatever message the source had, possibly none.
    #[error("{0}")]
    Other(String),
}

const BODY_EXCERPT_CHARS: usize = 200;

impl LlmError {
    /// Build [`LlmError::ApiResponse`] from a non-success status and raw body.
    ///
    /// Both Gemini and Anthropic answer failures with `{"error": {"message": ...}}`.
    #[must_use]
    pub fn api_response(status: u16, body: String) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.pointer("/error/message")?.as_str().map(str::to_string))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                let excerpt: String = body.trim().chars().take(BODY_EXCERPT_CHARS).collect();
                if excerpt.is_empty() { "empty response body".to_string() } else { excerpt }
            });
        Self::ApiResponse { status, message, body }
    }
}

// =============================================================================
// STORY GENERATOR TRAIT
// =============================================================================

/// Provider-neutral async seam for story generation. Enables mocking in tests.
#[async_trait::async_trait]
pub trait StoryGenerator: Send + Sync {
    /// Generate a story around the given topics.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the response is malformed,
    /// or the model answered without a usable story.
    async fn generate(&self, topics: &TopicPair) -> Result<GeneratedStory, LlmError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
