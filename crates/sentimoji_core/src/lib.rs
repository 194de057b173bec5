//! # Sentimoji Core
//!
//! The sentiment-to-emoji decision engine: lexicon matching, intensity
//! scoring, mixed-emotion blending, emoji selection and per-sentence
//! aggregation.
//!
//! ## Pipeline
//!
//! 1. A message is split into sentences.
//! 2. Each sentence is scored into a ranked sentiment list (sarcasm phrases,
//!    polarity signal, keyword hits, intensity modifiers).
//! 3. Known co-occurring pairs blend into a mixed emotion; otherwise the
//!    top-ranked sentiment picks the emoji, with an optional secondary one.
//! 4. The emoji count scales with sentence length and everything is stitched
//!    into one suggestion with a human-readable explanation.
//!
//! Every step is total: any input string, including the empty string, yields
//! a suggestion. Nothing in this crate does I/O; persistence and HTTP live
//! in the store and gateway crates.

pub mod config;
pub mod detector;
pub mod engine;
pub mod lexicon;
pub mod mixed;
pub mod polarity;
pub mod selector;

pub use config::{AppConfig, EngineConfig, ServerConfig, StorageConfig};
pub use detector::{SentimentDetector, SentimentScore};
pub use engine::{EmojiEngine, EmojiSuggestion, SentenceSuggestion};
pub use lexicon::{Intensity, MixedEmotion, Sentiment};
pub use mixed::resolve_mixed;
pub use polarity::{LexiconPolarity, PolarityEstimator};
pub use selector::{EmojiPicker, EmojiSelector, FirstPicker, RandomPicker, Selection};
