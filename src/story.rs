//! Story model — topics in, story plus citations out.
//!
//! DESIGN
//! ======
//! Field names match the JSON the web client exchanged (`title`, `story`,
//! `sources[].uri`, `sources[].title`) so `--json` output stays compatible.

use serde::{Deserialize, Serialize};

// =============================================================================
// TOPICS
// =============================================================================

/// The one or two topics a story is built around. Either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicPair {
    pub first: String,
    pub second: String,
}

impl TopicPair {
    #[must_use]
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self { first: first.into(), second: second.into() }
    }

    /// `true` when neither topic carries any non-whitespace text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first.trim().is_empty() && self.second.trim().is_empty()
    }

    /// Merge form answers with the topics kept from a dismissed error.
    ///
    /// Two blank answers resubmit `previous` unchanged; otherwise the answers
    /// are taken as typed, so a blank answer clears that topic.
    #[must_use]
    pub fn from_form(previous: &TopicPair, first: &str, second: &str) -> Self {
        if first.trim().is_empty() && second.trim().is_empty() {
            previous.clone()
        } else {
            Self::new(first, second)
        }
    }

    /// Trimmed, non-empty topics in entry order.
    pub fn non_empty(&self) -> impl Iterator<Item = &str> {
        [self.first.as_str(), self.second.as_str()]
            .into_iter()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

// =============================================================================
// GENERATED STORY
// =============================================================================

/// A citation attributed to the generated story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

impl Source {
    /// Build a source, falling back to the URI when the provider sent no title.
    #[must_use]
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        let uri = uri.into();
        let title = title.into();
        let title = if title.trim().is_empty() { uri.clone() } else { title };
        Self { uri, title }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedStory {
    pub title: String,
    pub story: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// Drop sources with an empty URI or a URI already seen. First occurrence wins.
#[must_use]
pub fn dedupe_sources(sources: impl IntoIterator<Item = Source>) -> Vec<Source> {
    let mut out: Vec<Source> = Vec::new();
    for source in sources {
        if source.uri.trim().is_empty() || out.iter().any(|s| s.uri == source.uri) {
            continue;
        }
        out.push(source);
    }
    out
}

#[cfg(test)]
#[path = "story_test.rs"]
mod tests;
