//! Terminal presentation — pure string renderers for each UI state.

use std::fmt::Write;

use crate::controller::UiState;
use crate::story::{GeneratedStory, TopicPair};

pub const WRAP_WIDTH: usize = 78;

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];
const RULE: &str = "────────────────────────────────────────";

#[must_use]
pub fn header() -> String {
    format!("{RULE}\n  Masal Atölyesi\n  Bir ya da iki konu ver, sana bir masal anlatayım.\n{RULE}")
}

#[must_use]
pub fn footer() -> String {
    format!("{RULE}\n  Masallar yapay zekâ ile yazılır; kaynaklar web aramasından gelir.")
}

/// Intro shown above the topic prompts; mentions previous topics when kept.
#[must_use]
pub fn form_intro(previous: &TopicPair) -> String {
    let mut out = String::from("Masal konularını gir (en az biri gerekli).");
    if !previous.is_empty() {
        let _ = write!(
            out,
            "\nÖnceki konular: \"{}\" / \"{}\" (ikisini de boş bırakırsan korunur)",
            previous.first.trim(),
            previous.second.trim()
        );
    }
    out
}

#[must_use]
pub fn spinner_frame(tick: usize) -> String {
    format!("{} Masalın hazırlanıyor...", SPINNER_FRAMES[tick % SPINNER_FRAMES.len()])
}

#[must_use]
pub fn error_panel(message: &str) -> String {
    format!("✗ {message}\n\n[Enter] Tekrar Dene")
}

#[must_use]
pub fn story_display(story: &GeneratedStory) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", story.title);
    let _ = writeln!(out, "{}", "═".repeat(story.title.chars().count().min(WRAP_WIDTH)));

    // Any run of line breaks (LF or CRLF) separates paragraphs.
    let paragraphs: Vec<&str> = story
        .story
        .lines()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    for (i, paragraph) in paragraphs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", wrap(paragraph, WRAP_WIDTH));
    }

    if !story.sources.is_empty() {
        out.push_str("\nKaynaklar:\n");
        for (i, source) in story.sources.iter().enumerate() {
            let _ = writeln!(out, "  {}. {} — {}", i + 1, source.title, source.uri);
        }
    }
    out.push_str("\n[Enter] Yeni Masal   [q] Çıkış");
    out
}

/// Pick exactly one view for the state.
#[must_use]
pub fn render_state(state: &UiState, topics: &TopicPair, tick: usize) -> String {
    match state {
        UiState::Idle => form_intro(topics),
        UiState::Loading => spinner_frame(tick),
        UiState::Error { message } => error_panel(message),
        UiState::Result { story } => story_display(story),
    }
}

/// Greedy word wrap. Words longer than `width` stay on their own line.
#[must_use]
pub fn wrap(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut line_len = 0;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len > 0 && line_len + 1 + word_len > width {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        out.push_str(word);
        line_len += word_len;
    }
    out
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
