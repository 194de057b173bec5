pub mod server;
pub mod types;

pub use server::ApiServer;
pub use types::{
    DeleteRequest, DeleteResponse, FeedbackRequest, HistoryItem, HistoryParams, HistoryResponse,
    PreferencesParams, PreferencesResponse, SuggestRequest, SuggestResponse,
};
