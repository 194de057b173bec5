pub mod sqlite;

pub use sqlite::SuggestionStore;
pub use sqlite::{
    AnalyticsReport, EmojiCount, EmojiUsage, FeedbackEntry, FeedbackTally, HistoryEntry,
    SentimentStats, StoredSuggestion,
};
