//! LLM — multi-provider story generation.
//!
//! DESIGN
//! ======
//! Configured from environment variables (plus CLI overrides). The
//! `StoryClient` dispatches to Gemini or Anthropic based on `LLM_PROVIDER`;
//! both use provider-side web search so the story comes back with citations.
//! The controller only sees the `StoryGenerator` trait.

pub mod anthropic;
pub mod config;
pub mod gemini;
pub mod prompt;
pub mod types;

use tracing::{debug, info};

use crate::story::{GeneratedStory, TopicPair};
use config::{LlmConfig, LlmOverrides, LlmProviderKind};
pub use types::StoryGenerator;
use types::LlmError;

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete story client that dispatches to either Gemini or Anthropic.
///
/// Configured from environment variables by [`StoryClient::from_env`].
pub struct StoryClient {
    inner: LlmProvider,
    model: String,
    max_tokens: u32,
}

enum LlmProvider {
    Gemini(gemini::GeminiClient),
    Anthropic(anthropic::AnthropicClient),
}

impl StoryClient {
    /// Build a story client from environment variables and CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env(overrides: &LlmOverrides) -> Result<Self, LlmError> {
        let config = LlmConfig::from_env(overrides)?;
        Self::from_config(config)
    }

    /// Build a story client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = match config.provider {
            LlmProviderKind::Gemini => LlmProvider::Gemini(gemini::GeminiClient::new(
                config.api_key,
                config.gemini_base_url,
                config.timeouts,
            )?),
            LlmProviderKind::Anthropic => {
                LlmProvider::Anthropic(anthropic::AnthropicClient::new(config.api_key, config.timeouts)?)
            }
        };
        Ok(Self { inner, model: config.model, max_tokens: config.max_tokens })
    }

    /// Return the configured model name (e.g. `"gemini-2.5-flash"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn provider(&self) -> LlmProviderKind {
        match self.inner {
            LlmProvider::Gemini(_) => LlmProviderKind::Gemini,
            LlmProvider::Anthropic(_) => LlmProviderKind::Anthropic,
        }
    }
}

#[async_trait::async_trait]
impl StoryGenerator for StoryClient {
    async fn generate(&self, topics: &TopicPair) -> Result<GeneratedStory, LlmError> {
        let user_prompt = prompt::build_user_prompt(topics);
        debug!(provider = self.provider().as_str(), model = %self.model, %user_prompt, "llm: request");

        let story = match &self.inner {
            LlmProvider::Gemini(c) => {
                c.generate(&self.model, self.max_tokens, prompt::SYSTEM_PROMPT, &user_prompt)
                    .await?
            }
            LlmProvider::Anthropic(c) => {
                c.generate(&self.model, self.max_tokens, prompt::SYSTEM_PROMPT, &user_prompt)
                    .await?
            }
        };

        info!(
            provider = self.provider().as_str(),
            model = %self.model,
            story_len = story.story.len(),
            sources = story.sources.len(),
            "llm: story generated"
        );
        Ok(story)
    }
}
