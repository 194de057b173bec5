use sentimoji_core::SentenceSuggestion;
use sentimoji_store::{EmojiUsage, FeedbackEntry, HistoryEntry};
use serde::{Deserialize, Serialize};

/// Inbound suggestion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestRequest {
    /// Message text to annotate with emojis.
    pub message: String,
    /// Caller identity. Omitted on first contact; the server assigns one
    /// and the client keeps it as its session identifier.
    #[serde(default)]
    pub user: Option<String>,
}

/// Suggestion plus the identifiers the client needs for follow-up calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub message_id: String,
    pub user_id: String,
    /// RFC3339 timestamp of the stored row.
    pub created_at: String,
    pub emojis: Vec<String>,
    pub message: String,
    pub explanation: String,
    pub sentences: Vec<SentenceSuggestion>,
}

/// Query parameters for `GET /history`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// One past suggestion in the history listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    pub message_id: String,
    pub message: String,
    pub emojis: Vec<String>,
    pub explanation: String,
    pub sentences: Vec<SentenceSuggestion>,
    /// RFC3339 timestamp.
    pub created_at: String,
    /// Present once the user has rated this suggestion.
    #[serde(default)]
    pub feedback: Option<FeedbackEntry>,
}

impl HistoryItem {
    /// Flatten a stored history row into the wire shape.
    pub fn from_entry(entry: HistoryEntry) -> Self {
        Self {
            message_id: entry.message_id,
            message: entry.message,
            emojis: entry.suggestion.emojis,
            explanation: entry.suggestion.explanation,
            sentences: entry.suggestion.sentences,
            created_at: entry.created_at.to_rfc3339(),
            feedback: entry.feedback,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryItem>,
}

/// Inbound feedback submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub message_id: String,
    pub user: String,
    /// 1 (poor) to 3 (great).
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Query parameters for `GET /preferences`.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesParams {
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub user: String,
    pub top_emojis: Vec<EmojiUsage>,
}

/// Inbound erasure request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Rows removed across all tables.
    pub deleted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use sentimoji_core::EmojiSuggestion;

    #[test]
    fn test_suggest_request_user_defaults_to_none() {
        let json = r#"{"message":"hello there"}"#;
        let req: SuggestRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.message, "hello there");
        assert!(req.user.is_none());
    }

    #[test]
    fn test_suggest_request_rejects_missing_message() {
        let json = r#"{"user":"alice"}"#;
        assert!(serde_json::from_str::<SuggestRequest>(json).is_err());
    }

    #[test]
    fn test_feedback_request_comment_optional() {
        let json = r#"{"message_id":"m1","user":"alice","rating":3}"#;
        let req: FeedbackRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.rating, 3);
        assert!(req.comment.is_none());
    }

    #[test]
    fn test_history_item_flattens_entry() {
        let entry = HistoryEntry {
            message_id: "m1".to_string(),
            message: "hi there".to_string(),
            suggestion: EmojiSuggestion {
                emojis: vec!["😊".to_string()],
                message: "hi there".to_string(),
                explanation: "\"hi there\": Primary sentiment: happy (mild).".to_string(),
                sentences: vec![],
            },
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            feedback: Some(FeedbackEntry {
                rating: 2,
                comment: None,
            }),
        };

        let item = HistoryItem::from_entry(entry);
        assert_eq!(item.message_id, "m1");
        assert_eq!(item.emojis, vec!["😊"]);
        assert!(item.created_at.starts_with("2023-11-14T"));
        assert_eq!(item.feedback.unwrap().rating, 2);
    }
}
