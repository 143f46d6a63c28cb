use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Clone, Debug, Serialize, TS)]
#[ts(export)]
pub struct HealthResponse {
    pub status: String,
    /// Whether chat replies come from the model or from canned fallbacks.
    pub credential_configured: bool,
}

#[derive(Clone, Debug, Serialize, TS)]
#[ts(export)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    #[ts(type = "number")]
    pub byte_size: usize,
    pub preview: String,
}

#[derive(Clone, Debug, Serialize, TS)]
#[ts(export)]
pub struct DocumentSummary {
    pub filename: String,
    #[ts(type = "number")]
    pub byte_size: usize,
    pub preview: String,
}

#[derive(Serialize, TS)]
#[ts(export)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
}

#[derive(Clone, Debug, Serialize, TS)]
#[ts(export)]
pub struct DocumentResponse {
    pub filename: String,
    #[ts(type = "number")]
    pub byte_size: usize,
    pub content: String,
}

#[derive(Clone, Debug, Serialize, TS)]
#[ts(export)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Default, Clone, Debug, Deserialize, TS)]
#[ts(export)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, Serialize, TS)]
#[ts(export)]
pub struct ChatResponse {
    pub response: String,
    pub source: String,
}

#[derive(Clone, Debug, Serialize, TS)]
#[ts(export)]
pub struct ChatTurnResponse {
    pub user_message: String,
    pub reply: String,
    pub created_at: String,
}

#[derive(Serialize, TS)]
#[ts(export)]
pub struct ChatHistoryResponse {
    pub turns: Vec<ChatTurnResponse>,
}
