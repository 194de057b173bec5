use crate::types::{
    DeleteRequest, DeleteResponse, FeedbackRequest, HistoryItem, HistoryParams, HistoryResponse,
    PreferencesParams, PreferencesResponse, SuggestRequest, SuggestResponse,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use sentimoji_core::{AppConfig, EmojiEngine};
use sentimoji_store::{AnalyticsReport, SuggestionStore};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

/// Shared state for the API server.
#[derive(Clone)]
struct AppState {
    /// The suggestion engine (stateless, shared across handlers).
    engine: Arc<EmojiEngine>,
    /// Persistent store (clones share one pool).
    store: SuggestionStore,
    /// Default number of history rows when the client sends no limit.
    history_limit: u32,
}

/// Error body every failed endpoint returns: status + `{"error": "..."}`.
type ApiError = (StatusCode, Json<Value>);

fn bad_request(msg: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": msg })),
    )
}

fn internal(what: &str, err: anyhow::Error) -> ApiError {
    tracing::error!("{}: {:#}", what, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "internal error" })),
    )
}

/// The suggestion HTTP API.
///
/// Routes:
/// - `POST /suggest` — annotate a message, persist the result
/// - `GET /history` — a user's past suggestions, newest first
/// - `POST /feedback` — rate a suggestion (upsert per message+user)
/// - `GET /analytics` — aggregate usage report
/// - `GET /preferences` — a user's top emojis
/// - `POST /delete_user_data` — erase everything stored for a user
/// - `POST /webhook` — integration stub, logs and acknowledges
/// - `GET /health` — health check
pub struct ApiServer {
    engine: Arc<EmojiEngine>,
    store: SuggestionStore,
    history_limit: u32,
    host: String,
    port: u16,
}

impl ApiServer {
    pub fn new(engine: EmojiEngine, store: SuggestionStore, config: &AppConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            store,
            history_limit: config.storage.history_limit,
            host: config.server.host.clone(),
            port: config.server.port,
        }
    }

    /// Start the server. This spawns a background task and returns the join handle.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        let state = AppState {
            engine: self.engine,
            store: self.store,
            history_limit: self.history_limit,
        };

        let app = Router::new()
            .route("/health", get(health))
            .route("/suggest", post(suggest))
            .route("/history", get(history))
            .route("/feedback", post(feedback))
            .route("/analytics", get(analytics))
            .route("/preferences", get(preferences))
            .route("/delete_user_data", post(delete_user_data))
            .route("/webhook", post(webhook))
            .layer(CorsLayer::permissive())
            .with_state(state);

        let addr = format!("{}:{}", self.host, self.port);

        tokio::spawn(async move {
            let listener = match tokio::net::TcpListener::bind(&addr).await {
                Ok(l) => l,
                Err(e) => {
                    tracing::error!("API server failed to bind {}: {}", addr, e);
                    return;
                }
            };
            tracing::info!("API server listening on {}", addr);
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("API server error: {}", e);
            }
        })
    }
}

// ============================================================================
// Route handlers
// ============================================================================

async fn health() -> &'static str {
    "ok"
}

/// POST /suggest — run the engine on a message and persist the result.
///
/// A request without `user` gets a fresh UUID; the client keeps it as its
/// session identifier for history and feedback calls.
async fn suggest(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let req: SuggestRequest = serde_json::from_value(payload)
        .map_err(|e| bad_request(&format!("Invalid request: {}", e)))?;

    let user_id = req.user.unwrap_or_else(|| Uuid::new_v4().to_string());
    let suggestion = state.engine.suggest(&req.message);

    let stored = state
        .store
        .store_suggestion(&user_id, &suggestion)
        .await
        .map_err(|e| internal("Failed to store suggestion", e))?;

    Ok(Json(SuggestResponse {
        message_id: stored.message_id,
        user_id,
        created_at: stored.created_at.to_rfc3339(),
        emojis: suggestion.emojis,
        message: suggestion.message,
        explanation: suggestion.explanation,
        sentences: suggestion.sentences,
    }))
}

/// GET /history?user=..&limit=.. — past suggestions, newest first.
async fn history(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Some(user) = params.user else {
        return Err(bad_request("Missing required parameter: user"));
    };
    let limit = params.limit.unwrap_or(state.history_limit);

    let entries = state
        .store
        .history(&user, limit)
        .await
        .map_err(|e| internal("History query failed", e))?;

    Ok(Json(HistoryResponse {
        history: entries.into_iter().map(HistoryItem::from_entry).collect(),
    }))
}

/// POST /feedback — rate a suggestion 1..=3, optionally with a comment.
async fn feedback(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let req: FeedbackRequest = serde_json::from_value(payload)
        .map_err(|e| bad_request(&format!("Invalid request: {}", e)))?;

    if !(1..=3).contains(&req.rating) {
        return Err(bad_request("rating must be between 1 and 3"));
    }

    state
        .store
        .upsert_feedback(&req.message_id, &req.user, req.rating, req.comment.as_deref())
        .await
        .map_err(|e| internal("Failed to record feedback", e))?;

    Ok(Json(serde_json::json!({ "msg": "Feedback recorded" })))
}

/// GET /analytics — aggregate report over everything stored.
async fn analytics(State(state): State<AppState>) -> Result<Json<AnalyticsReport>, ApiError> {
    let report = state
        .store
        .analytics()
        .await
        .map_err(|e| internal("Analytics query failed", e))?;
    Ok(Json(report))
}

/// GET /preferences?user=..&limit=.. — the user's top emojis by usage.
async fn preferences(
    State(state): State<AppState>,
    Query(params): Query<PreferencesParams>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let Some(user) = params.user else {
        return Err(bad_request("Missing required parameter: user"));
    };
    let limit = params.limit.unwrap_or(5);

    let top_emojis = state
        .store
        .top_emojis(&user, limit)
        .await
        .map_err(|e| internal("Preferences query failed", e))?;

    Ok(Json(PreferencesResponse { user, top_emojis }))
}

/// POST /delete_user_data — erase the user's suggestions, feedback and counters.
async fn delete_user_data(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let req: DeleteRequest = serde_json::from_value(payload)
        .map_err(|e| bad_request(&format!("Invalid request: {}", e)))?;

    let deleted = state
        .store
        .delete_user_data(&req.user)
        .await
        .map_err(|e| internal("Failed to delete user data", e))?;

    Ok(Json(DeleteResponse { deleted }))
}

/// POST /webhook — accept any JSON payload, log it, acknowledge.
async fn webhook(Json(payload): Json<Value>) -> Json<Value> {
    tracing::info!("Webhook payload received: {}", payload);
    Json(serde_json::json!({ "status": "received" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentimoji_core::{
        EmojiSelector, EmojiSuggestion, EngineConfig, FirstPicker, SentimentDetector,
    };

    /// In-memory state with the deterministic picker.
    async fn test_state() -> AppState {
        let engine = EmojiEngine::new(
            SentimentDetector::new(),
            EmojiSelector::with_picker(Box::new(FirstPicker)),
            &EngineConfig::default(),
        );
        let store = SuggestionStore::new(":memory:")
            .await
            .expect("Failed to create store");
        AppState {
            engine: Arc::new(engine),
            store,
            history_limit: 20,
        }
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let result = health().await;
        assert_eq!(result, "ok");
    }

    #[tokio::test]
    async fn test_api_server_creates() {
        let store = SuggestionStore::new(":memory:")
            .await
            .expect("Failed to create store");
        let config = AppConfig::default();
        let server = ApiServer::new(EmojiEngine::default(), store, &config);
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 8090);
        assert_eq!(server.history_limit, 20);
    }

    #[tokio::test]
    async fn test_suggest_assigns_user_and_persists() {
        let state = test_state().await;

        let Json(resp) = suggest(
            State(state.clone()),
            Json(serde_json::json!({ "message": "I am so happy today!" })),
        )
        .await
        .expect("suggest failed");

        assert!(Uuid::parse_str(&resp.user_id).is_ok());
        assert!(!resp.message_id.is_empty());
        assert_eq!(resp.emojis.len(), 1);
        assert!(resp.explanation.contains("Primary sentiment: happy"));
        assert_eq!(resp.sentences.len(), 1);

        let Json(hist) = history(
            State(state),
            Query(HistoryParams {
                user: Some(resp.user_id.clone()),
                limit: None,
            }),
        )
        .await
        .expect("history failed");
        assert_eq!(hist.history.len(), 1);
        assert_eq!(hist.history[0].message_id, resp.message_id);
        assert_eq!(hist.history[0].message, "I am so happy today!");
        assert!(hist.history[0].feedback.is_none());
    }

    #[tokio::test]
    async fn test_suggest_rejects_missing_message() {
        let state = test_state().await;

        let err = suggest(
            State(state),
            Json(serde_json::json!({ "user": "alice" })),
        )
        .await
        .unwrap_err();

        assert_eq!(err.0, StatusCode::BAD_REQUEST);
        assert!(err.1.get("error").is_some());
    }

    #[tokio::test]
    async fn test_history_requires_user() {
        let state = test_state().await;

        let err = history(
            State(state),
            Query(HistoryParams {
                user: None,
                limit: None,
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_feedback_validates_and_upserts() {
        let state = test_state().await;

        let Json(resp) = suggest(
            State(state.clone()),
            Json(serde_json::json!({ "message": "hello", "user": "alice" })),
        )
        .await
        .expect("suggest failed");

        // Out-of-range rating rejected
        let err = feedback(
            State(state.clone()),
            Json(serde_json::json!({
                "message_id": resp.message_id,
                "user": "alice",
                "rating": 5
            })),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        // Valid rating recorded
        feedback(
            State(state.clone()),
            Json(serde_json::json!({
                "message_id": resp.message_id,
                "user": "alice",
                "rating": 2,
                "comment": "decent"
            })),
        )
        .await
        .expect("feedback failed");

        // Resubmission updates in place
        feedback(
            State(state.clone()),
            Json(serde_json::json!({
                "message_id": resp.message_id,
                "user": "alice",
                "rating": 3
            })),
        )
        .await
        .expect("feedback failed");

        let Json(hist) = history(
            State(state),
            Query(HistoryParams {
                user: Some("alice".to_string()),
                limit: None,
            }),
        )
        .await
        .expect("history failed");
        let fb = hist.history[0].feedback.as_ref().expect("feedback missing");
        assert_eq!(fb.rating, 3);
        assert!(fb.comment.is_none());
    }

    #[tokio::test]
    async fn test_preferences_returns_top_emojis() {
        let state = test_state().await;

        suggest(
            State(state.clone()),
            Json(serde_json::json!({ "message": "I am so happy today!", "user": "alice" })),
        )
        .await
        .expect("suggest failed");
        suggest(
            State(state.clone()),
            Json(serde_json::json!({ "message": "I am so happy today!", "user": "alice" })),
        )
        .await
        .expect("suggest failed");

        let Json(resp) = preferences(
            State(state),
            Query(PreferencesParams {
                user: Some("alice".to_string()),
                limit: None,
            }),
        )
        .await
        .expect("preferences failed");

        assert_eq!(resp.user, "alice");
        assert_eq!(resp.top_emojis.len(), 1);
        assert_eq!(resp.top_emojis[0].usage_count, 2);
    }

    #[tokio::test]
    async fn test_preferences_default_limit_is_five() {
        let state = test_state().await;

        // Seven distinct counters for one user, seeded straight through the store.
        let seeded = EmojiSuggestion {
            emojis: ["😀", "😁", "😂", "😃", "😄", "😅", "😆"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            message: "a week of moods".to_string(),
            explanation: String::new(),
            sentences: Vec::new(),
        };
        state
            .store
            .store_suggestion("alice", &seeded)
            .await
            .expect("store failed");

        let Json(resp) = preferences(
            State(state),
            Query(PreferencesParams {
                user: Some("alice".to_string()),
                limit: None,
            }),
        )
        .await
        .expect("preferences failed");

        assert_eq!(resp.top_emojis.len(), 5);
    }

    #[tokio::test]
    async fn test_delete_user_data_endpoint() {
        let state = test_state().await;

        suggest(
            State(state.clone()),
            Json(serde_json::json!({ "message": "hello", "user": "alice" })),
        )
        .await
        .expect("suggest failed");

        let Json(resp) = delete_user_data(
            State(state.clone()),
            Json(serde_json::json!({ "user": "alice" })),
        )
        .await
        .expect("delete failed");
        assert!(resp.deleted >= 2); // suggestion row + usage counter

        let Json(hist) = history(
            State(state),
            Query(HistoryParams {
                user: Some("alice".to_string()),
                limit: None,
            }),
        )
        .await
        .expect("history failed");
        assert!(hist.history.is_empty());
    }

    #[tokio::test]
    async fn test_analytics_counts_messages() {
        let state = test_state().await;

        suggest(
            State(state.clone()),
            Json(serde_json::json!({ "message": "I feel really sad.", "user": "alice" })),
        )
        .await
        .expect("suggest failed");

        let Json(report) = analytics(State(state)).await.expect("analytics failed");
        assert_eq!(report.message_count, 1);
        assert!(!report.emoji_usage.is_empty());
    }

    #[tokio::test]
    async fn test_webhook_acknowledges() {
        let Json(resp) = webhook(Json(serde_json::json!({ "event": "ping" }))).await;
        assert_eq!(resp["status"], "received");
    }
}
