use std::{sync::Arc, time::Duration};

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub mod ai;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod routes;
pub mod storage;

use ai::{ChatResponder, CompletionsClient, LanguageModel, ResponderConfig};
use config::AppConfig;
use pipeline::{DocumentManager, FormatExtractor, Pipeline};
use routes::types::HealthResponse;
use storage::{ChatHistory, MemoryDocumentStore};

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pipeline: Arc<Pipeline>,
    pub responder: Arc<ChatResponder>,
    pub history: ChatHistory,
}

impl AppState {
    /// Wires the in-memory store, the upload directory and, when an API key
    /// is present, the chat-completions client.
    pub async fn build(config: AppConfig, api_key: Option<String>) -> Result<Self> {
        let document_manager = DocumentManager::new(&config.upload_dir).await?;

        let pipeline = Arc::new(Pipeline::new(
            Arc::new(MemoryDocumentStore::new()),
            document_manager,
            Arc::new(FormatExtractor::new()),
            config.limits.max_upload_bytes,
        ));

        let model: Option<Arc<dyn LanguageModel>> = match api_key {
            Some(key) => {
                let client: Arc<dyn LanguageModel> = Arc::new(CompletionsClient::new(
                    key,
                    Some(config.chat.base_url.clone()),
                    Duration::from_secs(config.chat.timeout_secs),
                )?);
                info!(model = %config.chat.model, "chat model configured");
                Some(client)
            }
            None => {
                warn!("OPENAI_API_KEY not set, chat will answer with fallback replies");
                None
            }
        };

        let responder = Arc::new(ChatResponder::new(
            model,
            ResponderConfig {
                model: config.chat.model.clone(),
                max_tokens: config.chat.max_tokens,
            },
        ));

        Ok(Self {
            config: Arc::new(config),
            pipeline,
            responder,
            history: ChatHistory::new(),
        })
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    let body_limit = state.config.limits.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health))
        .merge(routes::document_routes())
        .merge(routes::chat_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        credential_configured: state.responder.has_model(),
    })
}
