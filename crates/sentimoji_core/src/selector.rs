//! Emoji selection for one ranked sentiment list.
//!
//! A mixed-emotion match short-circuits to its blend pool; otherwise the
//! top-ranked sentiment picks the primary emoji and the runner-up may add a
//! second one when it is strong enough and has a pool to draw from.

use rand::seq::SliceRandom;

use crate::detector::SentimentScore;
use crate::lexicon::{self, Intensity};
use crate::mixed::resolve_mixed;

/// Chooses one emoji from a pool. Pools handed in are never empty.
///
/// The default is uniform random; tests swap in [`FirstPicker`] so the
/// chosen emoji is predictable.
pub trait EmojiPicker: Send + Sync {
    fn pick(&self, pool: &'static [&'static str]) -> &'static str;
}

/// Uniform random choice.
pub struct RandomPicker;

impl EmojiPicker for RandomPicker {
    fn pick(&self, pool: &'static [&'static str]) -> &'static str {
        let mut rng = rand::thread_rng();
        pool.choose(&mut rng).copied().unwrap_or("😐")
    }
}

/// Always the first pool entry. Deterministic, for tests and reproducible
/// runs.
pub struct FirstPicker;

impl EmojiPicker for FirstPicker {
    fn pick(&self, pool: &'static [&'static str]) -> &'static str {
        pool.first().copied().unwrap_or("😐")
    }
}

/// The selector's verdict for a single sentence.
#[derive(Debug, Clone)]
pub struct Selection {
    pub emojis: Vec<&'static str>,
    pub explanation: String,
}

pub struct EmojiSelector {
    picker: Box<dyn EmojiPicker>,
}

impl Default for EmojiSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl EmojiSelector {
    pub fn new() -> Self {
        Self {
            picker: Box::new(RandomPicker),
        }
    }

    pub fn with_picker(picker: Box<dyn EmojiPicker>) -> Self {
        Self { picker }
    }

    /// Picks one or two emojis for the ranked list, with an explanation of
    /// what drove the choice.
    pub fn select(&self, ranked: &[SentimentScore]) -> Selection {
        let Some(primary) = ranked.first() else {
            return Selection {
                emojis: vec![self.picker.pick(lexicon::neutral_pool())],
                explanation: "No sentiment detected, defaulting to neutral.".to_string(),
            };
        };

        if let Some(blend) = resolve_mixed(ranked) {
            let pool = blend.emojis();
            if !pool.is_empty() {
                return Selection {
                    emojis: vec![self.picker.pick(pool)],
                    explanation: format!("Mixed emotions detected: {}.", blend.describe()),
                };
            }
        }

        let mut pool = lexicon::emoji_pool(primary.sentiment, primary.intensity);
        if pool.is_empty() {
            pool = lexicon::neutral_pool();
        }
        let mut emojis = vec![self.picker.pick(pool)];
        let mut explanation = format!(
            "Primary sentiment: {} ({}).",
            primary.sentiment,
            primary.intensity.level()
        );

        if let Some(secondary) = ranked.get(1) {
            let second_pool = lexicon::emoji_pool(secondary.sentiment, secondary.intensity);
            if secondary.intensity >= Intensity::Moderate && !second_pool.is_empty() {
                emojis.push(self.picker.pick(second_pool));
                explanation.push_str(&format!(
                    " Secondary sentiment: {} ({}).",
                    secondary.sentiment,
                    secondary.intensity.level()
                ));
            } else {
                explanation.push_str(&format!(
                    " Secondary sentiment ({}) not strong enough for emoji.",
                    secondary.sentiment
                ));
            }
        }

        Selection {
            emojis,
            explanation,
        }
    }
}
