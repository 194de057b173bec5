//! Per-sentence sentiment detection.
//!
//! Signals are layered in a fixed order: sarcasm phrases, overall polarity,
//! keyword hits, intensity modifiers, the question-mark heuristic, then the
//! neutral fallback. Registrations only ever raise an intensity. The result
//! is ranked by label priority, never by intensity.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lexicon::{
    self, Intensity, Sentiment, MODIFIER_WINDOW, SARCASM_PHRASES,
};
use crate::polarity::{LexiconPolarity, PolarityEstimator};

/// Words plus standalone punctuation marks, in text order.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+|[^\w\s]").unwrap());

/// One detected sentiment with its strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub sentiment: Sentiment,
    pub intensity: Intensity,
}

/// Detects sentiments in a single sentence.
///
/// The polarity estimator is the only pluggable part; everything else is
/// driven by the static lexicon.
pub struct SentimentDetector {
    estimator: Box<dyn PolarityEstimator>,
}

impl Default for SentimentDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentDetector {
    pub fn new() -> Self {
        Self {
            estimator: Box::new(LexiconPolarity),
        }
    }

    pub fn with_estimator(estimator: Box<dyn PolarityEstimator>) -> Self {
        Self { estimator }
    }

    /// Scores a sentence and returns every registered sentiment, sorted by
    /// priority rank (most salient first).
    ///
    /// Total over all inputs: an empty or signal-free sentence yields a
    /// single neutral/mild entry, never an empty list.
    pub fn detect(&self, sentence: &str) -> Vec<SentimentScore> {
        let lower = sentence.to_lowercase();
        let tokens = tokenize(&lower);
        let mut scores: Vec<SentimentScore> = Vec::new();

        if SARCASM_PHRASES.iter().any(|p| lower.contains(p)) {
            register(&mut scores, Sentiment::Sarcasm, Intensity::Strong);
        }

        let polarity = self.estimator.score(sentence);
        if polarity > 0.6 {
            register(&mut scores, Sentiment::Happy, Intensity::Strong);
        } else if polarity > 0.2 {
            register(&mut scores, Sentiment::Happy, Intensity::Moderate);
        } else if polarity < -0.6 {
            register(&mut scores, Sentiment::Sad, Intensity::Strong);
        } else if polarity < -0.2 {
            register(&mut scores, Sentiment::Sad, Intensity::Moderate);
        }

        // Keyword pass. Strong keywords force intensity 3 outright.
        for sentiment in Sentiment::ALL {
            for keyword in sentiment.keywords() {
                if tokens.iter().any(|t| t == keyword) {
                    let intensity = if lexicon::is_strong_keyword(keyword) {
                        Intensity::Strong
                    } else {
                        Intensity::Mild
                    };
                    register(&mut scores, sentiment, intensity);
                }
            }
        }

        // Modifier pass: a modifier within the window before any keyword
        // occurrence raises that keyword's label, never lowers it.
        for sentiment in Sentiment::ALL {
            let Some(current) = intensity_of(&scores, sentiment) else {
                continue;
            };
            let mut best = current;
            for keyword in sentiment.keywords() {
                for (idx, token) in tokens.iter().enumerate() {
                    if token != keyword {
                        continue;
                    }
                    let start = idx.saturating_sub(MODIFIER_WINDOW);
                    for preceding in &tokens[start..idx] {
                        if let Some(level) = lexicon::modifier_level(preceding) {
                            best = best.max(level);
                        }
                    }
                }
            }
            register(&mut scores, sentiment, best);
        }

        if lower.contains('?') && intensity_of(&scores, Sentiment::Confused).is_none() {
            register(&mut scores, Sentiment::Confused, Intensity::Mild);
        }

        if scores.is_empty() {
            register(&mut scores, Sentiment::Neutral, Intensity::Mild);
        }

        scores.sort_by_key(|s| s.sentiment.priority());
        debug!(sentence, ranked = ?scores, "sentiment detection complete");
        scores
    }
}

fn tokenize(text: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

fn register(scores: &mut Vec<SentimentScore>, sentiment: Sentiment, intensity: Intensity) {
    if let Some(existing) = scores.iter_mut().find(|s| s.sentiment == sentiment) {
        existing.intensity = existing.intensity.max(intensity);
    } else {
        scores.push(SentimentScore {
            sentiment,
            intensity,
        });
    }
}

fn intensity_of(scores: &[SentimentScore], sentiment: Sentiment) -> Option<Intensity> {
    scores
        .iter()
        .find(|s| s.sentiment == sentiment)
        .map(|s| s.intensity)
}
