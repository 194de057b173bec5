//! Mixed-emotion resolution over a ranked sentiment list.

use crate::detector::SentimentScore;
use crate::lexicon::{MixedEmotion, Sentiment, MIXED_PATTERNS};

/// Returns the first declared pattern whose two labels are both present.
///
/// Patterns are checked in declared order, so when several pairs co-occur
/// the earlier pattern wins. Presence is enough; intensity does not gate
/// the blend.
pub fn resolve_mixed(ranked: &[SentimentScore]) -> Option<MixedEmotion> {
    let present = |label: Sentiment| ranked.iter().any(|s| s.sentiment == label);
    MIXED_PATTERNS.into_iter().find(|pattern| {
        let (a, b) = pattern.pair();
        present(a) && present(b)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Intensity;

    fn entry(sentiment: Sentiment, intensity: Intensity) -> SentimentScore {
        SentimentScore {
            sentiment,
            intensity,
        }
    }

    #[test]
    fn test_happy_sad_blend() {
        let ranked = vec![
            entry(Sentiment::Happy, Intensity::Mild),
            entry(Sentiment::Sad, Intensity::Mild),
        ];
        assert_eq!(resolve_mixed(&ranked), Some(MixedEmotion::HappySad));
    }

    #[test]
    fn test_excited_nervous_blend() {
        let ranked = vec![
            entry(Sentiment::Excited, Intensity::Strong),
            entry(Sentiment::Nervous, Intensity::Mild),
        ];
        assert_eq!(resolve_mixed(&ranked), Some(MixedEmotion::ExcitedNervous));
    }

    #[test]
    fn test_love_hate_matches_love_plus_angry() {
        let ranked = vec![
            entry(Sentiment::Love, Intensity::Moderate),
            entry(Sentiment::Angry, Intensity::Mild),
        ];
        assert_eq!(resolve_mixed(&ranked), Some(MixedEmotion::LoveHate));
    }

    #[test]
    fn test_single_sentiment_is_not_mixed() {
        let ranked = vec![entry(Sentiment::Happy, Intensity::Strong)];
        assert_eq!(resolve_mixed(&ranked), None);
    }

    #[test]
    fn test_unpaired_labels_are_not_mixed() {
        let ranked = vec![
            entry(Sentiment::Greeting, Intensity::Mild),
            entry(Sentiment::Danger, Intensity::Strong),
        ];
        assert_eq!(resolve_mixed(&ranked), None);
    }

    #[test]
    fn test_declared_order_breaks_ties() {
        // happy+sad and angry+confused are both present; happy_sad is
        // declared first and must win.
        let ranked = vec![
            entry(Sentiment::Happy, Intensity::Mild),
            entry(Sentiment::Angry, Intensity::Strong),
            entry(Sentiment::Sad, Intensity::Mild),
            entry(Sentiment::Confused, Intensity::Mild),
        ];
        assert_eq!(resolve_mixed(&ranked), Some(MixedEmotion::HappySad));
    }

    #[test]
    fn test_empty_list_is_not_mixed() {
        assert_eq!(resolve_mixed(&[]), None);
    }
}
