//! Overall message polarity estimation.
//!
//! The detector only needs a coarse positive/negative signal in `[-1, 1]`;
//! where it falls relative to the ±0.2 and ±0.6 thresholds decides whether a
//! happy/sad reading is registered and at what strength. The estimator is a
//! trait so a model-backed scorer can be dropped in later; the default is a
//! word-count heuristic.

/// Scores a short text's polarity in `[-1.0, 1.0]`.
///
/// Implementations must be total: any string, including the empty string,
/// gets a score. Exact values are implementation-defined; only the sign and
/// rough magnitude are contractual.
pub trait PolarityEstimator: Send + Sync {
    fn score(&self, text: &str) -> f32;
}

const POSITIVE: &[&str] = &[
    "happy", "joy", "joyful", "glad", "good", "great", "awesome", "amazing", "wonderful",
    "marvelous", "excellent", "fantastic", "love", "lovely", "nice", "best", "cheerful",
    "delighted", "excited", "thrilled", "fun", "beautiful", "perfect", "brilliant",
];

const NEGATIVE: &[&str] = &[
    "sad", "bad", "terrible", "horrible", "awful", "hate", "angry", "furious", "upset",
    "unhappy", "depressed", "miserable", "worst", "worried", "anxious", "scared", "afraid",
    "annoyed", "disappointed", "dreadful", "enraged", "gloomy", "hurt", "not", "never",
    "cannot",
];

/// Default word-count estimator.
///
/// Valence is `(pos - neg) / (pos + neg + 1)`, which stays inside `(-1, 1)`
/// and needs two or more uncontested hits to cross the strong ±0.6 line.
/// Exclamation marks amplify whatever signal is already there.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconPolarity;

impl PolarityEstimator for LexiconPolarity {
    fn score(&self, text: &str) -> f32 {
        let lower = text.to_lowercase();
        let mut pos = 0u32;
        let mut neg = 0u32;
        for word in lower.split(|c: char| !c.is_alphanumeric()) {
            if word.is_empty() {
                continue;
            }
            if POSITIVE.contains(&word) {
                pos += 1;
            }
            if NEGATIVE.contains(&word) {
                neg += 1;
            }
        }

        let valence = (pos as f32 - neg as f32) / (pos as f32 + neg as f32 + 1.0);

        let bangs = text.chars().filter(|&c| c == '!').count().min(2) as f32;
        (valence * (1.0 + 0.15 * bangs)).clamp(-1.0, 1.0)
    }
}
