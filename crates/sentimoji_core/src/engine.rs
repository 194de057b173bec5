//! Message-level suggestion assembly.
//!
//! Splits a message into sentences, runs detection and selection on each,
//! scales the emoji count with sentence length and stitches the per-sentence
//! results into one [`EmojiSuggestion`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::detector::SentimentDetector;
use crate::selector::EmojiSelector;

/// Suggestion for one sentence, in message order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceSuggestion {
    pub sentence: String,
    pub emojis: Vec<String>,
    pub explanation: String,
}

/// The assembled suggestion for a whole message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiSuggestion {
    pub emojis: Vec<String>,
    pub message: String,
    pub explanation: String,
    pub sentences: Vec<SentenceSuggestion>,
}

/// Stateless suggestion engine. Safe to share behind an `Arc`.
pub struct EmojiEngine {
    detector: SentimentDetector,
    selector: EmojiSelector,
    emoji_per_words: usize,
}

impl Default for EmojiEngine {
    fn default() -> Self {
        Self::with_config(&EngineConfig::default())
    }
}

impl EmojiEngine {
    /// Engine with the default polarity estimator and random picker.
    pub fn with_config(config: &EngineConfig) -> Self {
        Self::new(SentimentDetector::new(), EmojiSelector::new(), config)
    }

    pub fn new(
        detector: SentimentDetector,
        selector: EmojiSelector,
        config: &EngineConfig,
    ) -> Self {
        Self {
            detector,
            selector,
            // zero would divide by zero below
            emoji_per_words: config.emoji_per_words.max(1),
        }
    }

    /// Builds the suggestion for a message. Total: an empty or
    /// whitespace-only message yields the empty suggestion.
    pub fn suggest(&self, message: &str) -> EmojiSuggestion {
        let mut all_emojis: Vec<String> = Vec::new();
        let mut sentences: Vec<SentenceSuggestion> = Vec::new();
        let mut explanations: Vec<String> = Vec::new();

        for sentence in split_sentences(message) {
            let ranked = self.detector.detect(&sentence);
            let selection = self.selector.select(&ranked);

            let word_count = sentence.split_whitespace().count();
            let target = (word_count / self.emoji_per_words).max(1);
            let emojis = scale_emojis(&selection.emojis, target);

            explanations.push(format!("\"{}\": {}", sentence, selection.explanation));
            all_emojis.extend(emojis.iter().cloned());
            sentences.push(SentenceSuggestion {
                sentence,
                emojis,
                explanation: selection.explanation,
            });
        }

        debug!(
            message,
            sentence_count = sentences.len(),
            emoji_count = all_emojis.len(),
            "suggestion assembled"
        );

        EmojiSuggestion {
            emojis: all_emojis,
            message: message.to_string(),
            explanation: explanations.join("\n"),
            sentences,
        }
    }
}

/// Splits at whitespace that directly follows `.`, `!` or `?`, keeping the
/// punctuation with its sentence. A message without terminal punctuation is
/// one sentence. Sentences are trimmed; empty ones are dropped.
fn split_sentences(message: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut after_terminal = false;

    for c in message.trim().chars() {
        if c.is_whitespace() && after_terminal {
            push_sentence(&mut sentences, &current);
            current.clear();
            after_terminal = false;
            continue;
        }
        if !c.is_whitespace() {
            after_terminal = matches!(c, '.' | '!' | '?');
        }
        current.push(c);
    }
    push_sentence(&mut sentences, &current);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

/// Repeats `base` cyclically and cuts to exactly `target` entries.
/// Deterministic: no new random choices are introduced here.
fn scale_emojis(base: &[&'static str], target: usize) -> Vec<String> {
    base.iter()
        .cycle()
        .take(target)
        .map(|e| e.to_string())
        .collect()
}
