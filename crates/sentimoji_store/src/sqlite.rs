use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sentimoji_core::EmojiSuggestion;
use serde::{Deserialize, Serialize};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Row, Sqlite};
use std::collections::HashMap;
use std::path::Path;
use uuid::Uuid;

// ============================================================================
// Row types
// ============================================================================

/// Identity of a freshly stored suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSuggestion {
    pub message_id: String,
    pub created_at: DateTime<Utc>,
}

/// One history row: the stored suggestion plus any feedback for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub message_id: String,
    pub message: String,
    pub suggestion: EmojiSuggestion,
    pub created_at: DateTime<Utc>,
    pub feedback: Option<FeedbackEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub rating: i64,
    pub comment: Option<String>,
}

/// Per-user usage counter row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiUsage {
    pub emoji: String,
    pub usage_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmojiCount {
    pub emoji: String,
    pub count: i64,
}

/// Coarse sentiment buckets derived by scanning stored explanations for the
/// literal substrings "positive", "negative" and "neutral". Explanations that
/// name a concrete label ("happy", "sad", ...) land in `other`; only neutral
/// fallbacks hit a bucket. Kept as-is for continuity with existing dashboards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentStats {
    pub positive: i64,
    pub negative: i64,
    pub neutral: i64,
    pub other: i64,
}

/// Feedback counts on the 1-3 rating scale, serialized under the rating keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackTally {
    #[serde(rename = "1")]
    pub low: i64,
    #[serde(rename = "2")]
    pub mid: i64,
    #[serde(rename = "3")]
    pub high: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub emoji_usage: Vec<EmojiCount>,
    pub sentiment_stats: SentimentStats,
    pub feedback_stats: FeedbackTally,
    pub message_count: i64,
}

// ============================================================================
// Store
// ============================================================================

#[derive(Clone)]
pub struct SuggestionStore {
    pool: Pool<Sqlite>,
}

impl SuggestionStore {
    pub async fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_url = format!("sqlite://{}?mode=rwc", db_path.as_ref().display());
        let pool = SqlitePoolOptions::new()
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("PRAGMA foreign_keys = ON").execute(conn).await?;
                    Ok(())
                })
            })
            .connect(&db_url)
            .await
            .context("Failed to connect to SQLite database")?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS suggestions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                message TEXT NOT NULL,
                suggestion_json TEXT NOT NULL,
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create suggestions table")?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_suggestions_user ON suggestions(user_id, created_at)",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create suggestions user index")?;

        // One active rating per (message, user); a resubmission updates in place.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS feedback (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                message_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                rating INTEGER NOT NULL,
                comment TEXT,
                created_at INTEGER NOT NULL,
                UNIQUE(message_id, user_id)
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create feedback table")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS emoji_usage (
                user_id TEXT NOT NULL,
                emoji TEXT NOT NULL,
                usage_count INTEGER NOT NULL DEFAULT 0,
                last_used INTEGER NOT NULL,
                UNIQUE(user_id, emoji)
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create emoji_usage table")?;

        Ok(())
    }

    /// Stores a suggestion and bumps the user's usage counter for every emoji
    /// occurrence, in one transaction.
    pub async fn store_suggestion(
        &self,
        user_id: &str,
        suggestion: &EmojiSuggestion,
    ) -> Result<StoredSuggestion> {
        let message_id = Uuid::new_v4().to_string();
        let created_at = Utc::now();
        let ts = created_at.timestamp();
        let json =
            serde_json::to_string(suggestion).context("Failed to serialize suggestion")?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO suggestions (id, user_id, message, suggestion_json, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&message_id)
        .bind(user_id)
        .bind(&suggestion.message)
        .bind(&json)
        .bind(ts)
        .execute(&mut *tx)
        .await
        .context("Failed to insert suggestion")?;

        for emoji in &suggestion.emojis {
            sqlx::query(
                "INSERT INTO emoji_usage (user_id, emoji, usage_count, last_used) VALUES (?, ?, 1, ?)
                 ON CONFLICT(user_id, emoji) DO UPDATE SET
                     usage_count = usage_count + 1,
                     last_used = excluded.last_used",
            )
            .bind(user_id)
            .bind(emoji)
            .bind(ts)
            .execute(&mut *tx)
            .await
            .context("Failed to bump emoji usage")?;
        }

        tx.commit().await?;
        tracing::debug!("Stored suggestion {} for user {}", message_id, user_id);

        Ok(StoredSuggestion {
            message_id,
            created_at,
        })
    }

    /// The user's most recent suggestions, newest first, with feedback joined
    /// in where it exists.
    pub async fn history(&self, user_id: &str, limit: u32) -> Result<Vec<HistoryEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT s.id, s.message, s.suggestion_json, s.created_at, f.rating, f.comment
            FROM suggestions s
            LEFT JOIN feedback f ON f.message_id = s.id AND f.user_id = s.user_id
            WHERE s.user_id = ?
            ORDER BY s.created_at DESC, s.rowid DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query history")?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let json: String = row.get("suggestion_json");
            let suggestion: EmojiSuggestion =
                serde_json::from_str(&json).context("Failed to decode stored suggestion")?;
            let ts: i64 = row.get("created_at");
            let created_at = DateTime::from_timestamp(ts, 0)
                .context("Stored timestamp out of range")?;
            let rating: Option<i64> = row.get("rating");
            let feedback = rating.map(|rating| FeedbackEntry {
                rating,
                comment: row.get("comment"),
            });
            entries.push(HistoryEntry {
                message_id: row.get("id"),
                message: row.get("message"),
                suggestion,
                created_at,
                feedback,
            });
        }
        Ok(entries)
    }

    /// Records or replaces the rating for (message, user).
    pub async fn upsert_feedback(
        &self,
        message_id: &str,
        user_id: &str,
        rating: i64,
        comment: Option<&str>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO feedback (message_id, user_id, rating, comment, created_at)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(message_id, user_id) DO UPDATE SET
                 rating = excluded.rating,
                 comment = excluded.comment,
                 created_at = excluded.created_at",
        )
        .bind(message_id)
        .bind(user_id)
        .bind(rating)
        .bind(comment)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .context("Failed to upsert feedback")?;

        tracing::debug!("Feedback {} recorded for message {}", rating, message_id);
        Ok(())
    }

    /// The user's favourite emojis, by usage count then recency.
    pub async fn top_emojis(&self, user_id: &str, limit: u32) -> Result<Vec<EmojiUsage>> {
        let rows = sqlx::query(
            "SELECT emoji, usage_count FROM emoji_usage
             WHERE user_id = ?
             ORDER BY usage_count DESC, last_used DESC
             LIMIT ?",
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query emoji usage")?;

        Ok(rows
            .into_iter()
            .map(|row| EmojiUsage {
                emoji: row.get("emoji"),
                usage_count: row.get("usage_count"),
            })
            .collect())
    }

    /// Aggregates every stored suggestion into emoji frequencies and coarse
    /// sentiment buckets, plus the feedback tally and total message count.
    pub async fn analytics(&self) -> Result<AnalyticsReport> {
        let rows = sqlx::query("SELECT suggestion_json FROM suggestions")
            .fetch_all(&self.pool)
            .await
            .context("Failed to scan suggestions")?;

        let mut counts: HashMap<String, i64> = HashMap::new();
        let mut sentiment_stats = SentimentStats::default();
        for row in &rows {
            let json: String = row.get("suggestion_json");
            let suggestion: EmojiSuggestion =
                serde_json::from_str(&json).context("Failed to decode stored suggestion")?;
            for emoji in &suggestion.emojis {
                *counts.entry(emoji.clone()).or_insert(0) += 1;
            }
            let explanation = suggestion.explanation.to_lowercase();
            if explanation.contains("positive") {
                sentiment_stats.positive += 1;
            } else if explanation.contains("negative") {
                sentiment_stats.negative += 1;
            } else if explanation.contains("neutral") {
                sentiment_stats.neutral += 1;
            } else {
                sentiment_stats.other += 1;
            }
        }

        let mut emoji_usage: Vec<EmojiCount> = counts
            .into_iter()
            .map(|(emoji, count)| EmojiCount { emoji, count })
            .collect();
        emoji_usage.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.emoji.cmp(&b.emoji)));

        let mut feedback_stats = FeedbackTally::default();
        let tallies = sqlx::query("SELECT rating, COUNT(*) AS n FROM feedback GROUP BY rating")
            .fetch_all(&self.pool)
            .await
            .context("Failed to tally feedback")?;
        for row in tallies {
            let rating: i64 = row.get("rating");
            let n: i64 = row.get("n");
            match rating {
                1 => feedback_stats.low = n,
                2 => feedback_stats.mid = n,
                3 => feedback_stats.high = n,
                _ => {}
            }
        }

        let message_count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM suggestions")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count suggestions")?
            .get("n");

        Ok(AnalyticsReport {
            emoji_usage,
            sentiment_stats,
            feedback_stats,
            message_count,
        })
    }

    /// Removes everything stored for a user. Returns the number of rows
    /// deleted across all tables.
    pub async fn delete_user_data(&self, user_id: &str) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let feedback = sqlx::query("DELETE FROM feedback WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete feedback")?
            .rows_affected();
        let usage = sqlx::query("DELETE FROM emoji_usage WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete emoji usage")?
            .rows_affected();
        let suggestions = sqlx::query("DELETE FROM suggestions WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .context("Failed to delete suggestions")?
            .rows_affected();

        tx.commit().await?;
        tracing::info!(
            "Deleted user {} data: {} suggestions, {} feedback, {} usage rows",
            user_id,
            suggestions,
            feedback,
            usage
        );
        Ok(suggestions + feedback + usage)
    }
}
