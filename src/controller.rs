//! Application state controller — the four-state UI model.
//!
//! DESIGN
//! ======
//! `UiState` is a sum type so form, spinner, error and result can never be
//! active together. All transitions go through `Controller`. `generate`
//! takes `&mut self`, so a second request cannot start while one is pending.
//!
//! `generate` is `begin` + the awaited call + `settle`. The two halves are
//! public so callers (and tests) can observe the `Loading` state.

use std::sync::Arc;

use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use crate::llm::StoryGenerator;
use crate::llm::types::LlmError;
use crate::story::{GeneratedStory, TopicPair};

pub const EMPTY_TOPICS_MESSAGE: &str = "Lütfen masal oluşturmak için en az bir konu girin.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Masal oluşturulurken bilinmeyen bir hata oluştu. Lütfen tekrar deneyin.";

// =============================================================================
// UI STATE
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    Error {
        message: String,
    },
    Result {
        story: GeneratedStory,
    },
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct Controller {
    generator: Arc<dyn StoryGenerator>,
    state: UiState,
    topics: TopicPair,
}

impl Controller {
    #[must_use]
    pub fn new(generator: Arc<dyn StoryGenerator>) -> Self {
        Self { generator, state: UiState::Idle, topics: TopicPair::default() }
    }

    #[must_use]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Topics of the current or most recent request; empty after `reset`.
    #[must_use]
    pub fn topics(&self) -> &TopicPair {
        &self.topics
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, UiState::Loading)
    }

    /// Validate topics and generate a story, settling in `Result` or `Error`.
    pub async fn generate(&mut self, topic1: &str, topic2: &str) -> &UiState {
        let Some(topics) = self.begin(topic1, topic2) else {
            return &self.state;
        };

        let request_id = Uuid::new_v4();
        info!(%request_id, first = %topics.first, second = %topics.second, "controller: generating story");

        let span = info_span!("generate", %request_id);
        let outcome = self.generator.generate(&topics).instrument(span).await;
        if let Err(e) = &outcome {
            warn!(%request_id, error = %e, "controller: story generation failed");
        }
        self.settle(outcome);
        &self.state
    }

    /// First half of `generate`. Returns the topics to send, or `None` after
    /// moving to `Error` when both topics are empty.
    pub fn begin(&mut self, topic1: &str, topic2: &str) -> Option<TopicPair> {
        let topics = TopicPair::new(topic1, topic2);
        if topics.is_empty() {
            self.state = UiState::Error { message: EMPTY_TOPICS_MESSAGE.to_string() };
            return None;
        }
        self.state = UiState::Loading;
        self.topics = topics.clone();
        Some(topics)
    }

    /// Second half of `generate`. Always leaves `Loading`.
    pub fn settle(&mut self, outcome: Result<GeneratedStory, LlmError>) {
        self.state = match outcome {
            Ok(story) => UiState::Result { story },
            Err(e) => UiState::Error { message: user_message(&e) },
        };
    }

    /// Back to `Idle`, forgetting topics, error and result.
    pub fn reset(&mut self) {
        self.state = UiState::Idle;
        self.topics = TopicPair::default();
    }

    /// Leave `Error` for `Idle`, keeping topics so the form can be pre-filled.
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, UiState::Error { .. }) {
            self.state = UiState::Idle;
        }
    }
}

fn user_message(err: &LlmError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() { GENERIC_FAILURE_MESSAGE.to_string() } else { message }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
