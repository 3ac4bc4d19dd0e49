//! Narration script model.
//!
//! A [`Script`] is the cleaned word sequence that drives caption timing.
//! Generated narration often carries stage directions and speaker labels
//! that must never appear on screen, so cleanup happens at construction
//! and the word list is immutable afterwards.

use serde::{Deserialize, Serialize};

/// Speaker labels that are stripped when they prefix a line.
const SPEAKER_LABELS: &[&str] = &["narrator", "voiceover", "vo", "host"];

/// An immutable sequence of caption words derived from narration text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    words: Vec<String>,
}

impl Script {
    /// Build a script from raw generated narration.
    ///
    /// Cleanup applied before tokenization:
    /// - bracketed annotations (`[dramatic pause]`) are removed
    /// - parenthesized stage directions (`(beat)`) are removed
    /// - leading speaker labels (`NARRATOR:`) are removed per line
    ///
    /// Tokens are whitespace-delimited; no further normalization.
    pub fn from_narration(text: &str) -> Self {
        let mut words = Vec::new();
        for line in text.lines() {
            let line = strip_speaker_label(line);
            let cleaned = strip_annotations(line);
            words.extend(cleaned.split_whitespace().map(str::to_string));
        }
        Self { words }
    }

    /// Build a script from already-clean words (mainly for tests).
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// The word sequence, in narration order.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Number of words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// True if no words survived cleanup.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Remove a leading `LABEL:` speaker prefix if LABEL is a known one.
fn strip_speaker_label(line: &str) -> &str {
    let trimmed = line.trim_start();
    if let Some(colon) = trimmed.find(':') {
        let label = trimmed[..colon].trim().to_ascii_lowercase();
        if SPEAKER_LABELS.contains(&label.as_str()) {
            return &trimmed[colon + 1..];
        }
    }
    line
}

/// Remove `[...]` and `(...)` spans from a line.
///
/// Nesting is not expected in generated narration; an unclosed span is
/// dropped through end of line.
fn strip_annotations(line: &str) -> String {
    let mut result = String::with_capacity(line.len());
    let mut depth_square = 0usize;
    let mut depth_round = 0usize;

    for c in line.chars() {
        match c {
            '[' => depth_square += 1,
            ']' if depth_square > 0 => depth_square -= 1,
            '(' => depth_round += 1,
            ')' if depth_round > 0 => depth_round -= 1,
            _ if depth_square == 0 && depth_round == 0 => result.push(c),
            _ => {}
        }
    }

    result
}
