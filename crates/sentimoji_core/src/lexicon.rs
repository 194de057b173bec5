//! Static sentiment lexicon: keyword lists, intensity modifiers, mixed-emotion
//! patterns and the emoji pools they map to.
//!
//! Everything in this module is read-only `const` data compiled into the
//! binary. Lookups cannot fail and never allocate.

use serde::{Deserialize, Serialize};

/// Closed vocabulary of sentiment labels.
///
/// `ALL` lists keyword-bearing labels first, in the order the keyword pass
/// scans them; `neutral` and `sarcasm` carry no keywords and are registered
/// by fallback and phrase detection respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Happy,
    Sad,
    Love,
    Excited,
    Greeting,
    Angry,
    Danger,
    Confused,
    Nervous,
    Neutral,
    Sarcasm,
}

impl Sentiment {
    pub const ALL: [Sentiment; 11] = [
        Sentiment::Happy,
        Sentiment::Sad,
        Sentiment::Love,
        Sentiment::Excited,
        Sentiment::Greeting,
        Sentiment::Angry,
        Sentiment::Danger,
        Sentiment::Confused,
        Sentiment::Nervous,
        Sentiment::Neutral,
        Sentiment::Sarcasm,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Happy => "happy",
            Sentiment::Sad => "sad",
            Sentiment::Love => "love",
            Sentiment::Excited => "excited",
            Sentiment::Greeting => "greeting",
            Sentiment::Angry => "angry",
            Sentiment::Danger => "danger",
            Sentiment::Confused => "confused",
            Sentiment::Nervous => "nervous",
            Sentiment::Neutral => "neutral",
            Sentiment::Sarcasm => "sarcasm",
        }
    }

    /// Salience rank used to order detected sentiments. Lower wins.
    ///
    /// Note this is NOT intensity: a strong sarcasm still ranks below a mild
    /// happy. Which sentiment becomes primary is decided here alone.
    pub fn priority(self) -> u8 {
        match self {
            Sentiment::Excited => 1,
            Sentiment::Love => 2,
            Sentiment::Happy => 3,
            Sentiment::Angry => 4,
            Sentiment::Danger => 5,
            Sentiment::Sad => 6,
            Sentiment::Nervous => 7,
            Sentiment::Greeting => 8,
            Sentiment::Confused => 9,
            Sentiment::Neutral => 10,
            Sentiment::Sarcasm => 11,
        }
    }

    /// Trigger keywords for this label (word-level match, lowercase).
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Sentiment::Happy => &["happy", "joy", "good", "great", "awesome", "cheerful"],
            Sentiment::Sad => &["sad", "bad", "upset", "unhappy", "depressed"],
            Sentiment::Love => &["love", "heart", "adore", "cherish"],
            Sentiment::Excited => &["excited", "wow", "amazing", "thrilled"],
            Sentiment::Greeting => &["hello", "hi", "hey", "greetings"],
            Sentiment::Angry => &["angry", "furious", "mad", "irritated"],
            Sentiment::Danger => &["danger", "warning", "alert", "emergency"],
            Sentiment::Confused => &["confused", "why", "huh", "what"],
            Sentiment::Nervous => &["nervous", "anxious", "worried", "apprehensive"],
            Sentiment::Neutral | Sentiment::Sarcasm => &[],
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-step intensity scale gating which emoji sub-pool is used.
///
/// Ordered so `max` picks the stronger reading; registrations only ever
/// upgrade, never downgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Mild = 1,
    Moderate = 2,
    Strong = 3,
}

impl Intensity {
    pub fn level(self) -> &'static str {
        match self {
            Intensity::Mild => "mild",
            Intensity::Moderate => "moderate",
            Intensity::Strong => "strong",
        }
    }
}

/// Keywords whose mere presence forces intensity 3, modifiers or not.
const STRONG_KEYWORDS: &[&str] = &[
    "marvelous", "amazing", "wonderful", "terrible", "horrible", "furious", "enraged", "urgent",
];

/// Intensity modifier words checked in the window before a keyword.
/// "a little" is a phrase entry and only fires if the tokenizer ever yields
/// it as one token; single-word entries do the real work.
const MODIFIERS: &[(&str, Intensity)] = &[
    ("slightly", Intensity::Mild),
    ("a little", Intensity::Mild),
    ("very", Intensity::Moderate),
    ("really", Intensity::Moderate),
    ("so", Intensity::Moderate),
    ("extremely", Intensity::Strong),
    ("seriously", Intensity::Strong),
    ("completely", Intensity::Strong),
];

/// How many tokens before a keyword the modifier scan looks at.
pub const MODIFIER_WINDOW: usize = 3;

/// Phrases that flip a sentence to sarcasm (substring match, lowercase).
pub const SARCASM_PHRASES: &[&str] = &["yeah right", "as if", "sure..."];

pub fn is_strong_keyword(word: &str) -> bool {
    STRONG_KEYWORDS.contains(&word)
}

pub fn modifier_level(word: &str) -> Option<Intensity> {
    MODIFIERS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, level)| *level)
}

// ============================================================================
// Emoji pools
// ============================================================================

/// Emoji pool for a label at a given intensity level.
///
/// Some combinations are deliberately empty: `nervous` has no pool at any
/// level (it only ever suppresses or blends), and `sarcasm` only exists at
/// strong. Callers fall back to `neutral_pool()` where a pool is required.
pub fn emoji_pool(label: Sentiment, level: Intensity) -> &'static [&'static str] {
    use Intensity::*;
    use Sentiment::*;
    match (label, level) {
        (Happy, Mild) => &["😊", "🙂", "😄", "😀"],
        (Happy, Moderate) => &["😃", "😁", "😆"],
        (Happy, Strong) => &["🤩", "🥳", "😻", "🎉", "🎊"],

        (Sad, Mild) => &["😔", "😞", "🥺", "😟"],
        (Sad, Moderate) => &["😢", "😥", "😭"],
        (Sad, Strong) => &["😩", "😣", "😿", "💔"],

        (Love, Mild) => &["🥰", "😍", "❤️", "😘"],
        (Love, Moderate) => &["💖", "💕", "💞", "💓"],
        (Love, Strong) => &["💘", "💝", "💟"],

        (Excited, Mild) => &["😎", "😏", "😺", "🤩"],
        (Excited, Moderate) => &["🤩", "🥳", "😻", "🙌"],
        (Excited, Strong) => &["🚀", "🔥", "🎉", "🎊"],

        (Greeting, Mild) => &["👋", "🤚", "🖐️", "🤝"],
        (Greeting, Moderate) => &["✌️", "🤞", "👌", "🤙"],
        (Greeting, Strong) => &["🤟", "🖖", "✋", "🙏"],

        (Angry, Mild) => &["😠", "😒", "😤"],
        (Angry, Moderate) => &["😡", "🤬"],
        (Angry, Strong) => &["👿"],

        (Danger, Mild) => &["⚠️", "🚨", "🆘", "🛑"],
        (Danger, Moderate) => &["😰", "😨", "😬", "😱"],
        (Danger, Strong) => &["🔥", "💣", "💥"],

        (Confused, Mild) => &["😕", "🤔", "🧐", "🤷"],
        (Confused, Moderate) => &["😖", "😣", "🤨", "😟"],
        (Confused, Strong) => &["😵", "😓", "🤯", "❓"],

        (Neutral, Mild) => &["😐", "😑", "😶", "😌"],
        (Neutral, Moderate) => &["😒", "🙄", "😏", "😶"],
        (Neutral, Strong) => &["🤨", "🧐", "🗿", "🧊"],

        (Sarcasm, Strong) => &["🙃", "😏", "😒"],

        (Nervous, _) | (Sarcasm, Mild | Moderate) => &[],
    }
}

/// The neutral/mild pool used as the selector's last-resort fallback.
pub fn neutral_pool() -> &'static [&'static str] {
    emoji_pool(Sentiment::Neutral, Intensity::Mild)
}

// ============================================================================
// Mixed-emotion patterns
// ============================================================================

/// A known pair of co-occurring sentiments that blends into its own emoji
/// pool instead of a primary/secondary split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixedEmotion {
    HappySad,
    ExcitedNervous,
    LoveHate,
    AngryConfused,
}

/// Declared pattern order. Earlier entries win when several pairs are
/// present in the same sentence; this tie-break is deliberate.
pub const MIXED_PATTERNS: [MixedEmotion; 4] = [
    MixedEmotion::HappySad,
    MixedEmotion::ExcitedNervous,
    MixedEmotion::LoveHate,
    MixedEmotion::AngryConfused,
];

impl MixedEmotion {
    pub fn as_str(self) -> &'static str {
        match self {
            MixedEmotion::HappySad => "happy_sad",
            MixedEmotion::ExcitedNervous => "excited_nervous",
            MixedEmotion::LoveHate => "love_hate",
            MixedEmotion::AngryConfused => "angry_confused",
        }
    }

    /// The two labels that must both be present for this blend to apply.
    pub fn pair(self) -> (Sentiment, Sentiment) {
        match self {
            MixedEmotion::HappySad => (Sentiment::Happy, Sentiment::Sad),
            MixedEmotion::ExcitedNervous => (Sentiment::Excited, Sentiment::Nervous),
            MixedEmotion::LoveHate => (Sentiment::Love, Sentiment::Angry),
            MixedEmotion::AngryConfused => (Sentiment::Angry, Sentiment::Confused),
        }
    }

    pub fn emojis(self) -> &'static [&'static str] {
        match self {
            MixedEmotion::HappySad => &["😊😢", "😄😔", "🥲"],
            MixedEmotion::ExcitedNervous => &["🤩😬", "😃😅", "😁😰"],
            MixedEmotion::LoveHate => &["🥰😒", "😍🙄"],
            MixedEmotion::AngryConfused => &["😡😕", "🤬🤔"],
        }
    }

    /// Human-readable form of the blend name, e.g. "happy + sad".
    pub fn describe(self) -> String {
        self.as_str().replace('_', " + ")
    }
}
