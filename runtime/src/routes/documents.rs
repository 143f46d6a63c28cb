use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
};
use tracing::info;

use super::types::{
    DocumentListResponse, DocumentResponse, DocumentSummary, MessageResponse, UploadResponse,
};
use crate::{
    AppState,
    error::{AppError, AppResult},
    pipeline::{Upload, utils::preview},
};

pub fn document_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(upload_document))
        .route("/documents", get(list_documents))
        .route(
            "/documents/{filename}",
            get(get_document).delete(delete_document),
        )
}

async fn upload_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let limit = state.config.limits.max_upload_bytes;
    let mut upload: Option<Upload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| multipart_error(err, limit))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().map(str::to_string).unwrap_or_default();
            let content_type = field.content_type().map(str::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|err| multipart_error(err, limit))?;
            upload = Some(Upload {
                filename,
                content_type,
                bytes: data.to_vec(),
            });
            break;
        }
    }

    let upload = upload.ok_or_else(|| AppError::validation("No file provided"))?;
    let document = state.pipeline.ingest(upload).await?;

    info!(filename = %document.filename, "file uploaded successfully");

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        preview: preview(&document.content, state.config.limits.upload_preview_chars),
        filename: document.filename,
        byte_size: document.byte_size,
    }))
}

fn multipart_error(err: axum::extract::multipart::MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::validation(format!("invalid multipart payload: {}", err.body_text()))
    }
}

async fn list_documents(State(state): State<Arc<AppState>>) -> AppResult<Json<DocumentListResponse>> {
    let limit = state.config.limits.list_preview_chars;
    let documents = state
        .pipeline
        .list()
        .await?
        .into_iter()
        .map(|doc| DocumentSummary {
            preview: preview(&doc.content, limit),
            filename: doc.filename,
            byte_size: doc.byte_size,
        })
        .collect();

    Ok(Json(DocumentListResponse { documents }))
}

async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> AppResult<Json<DocumentResponse>> {
    let doc = state.pipeline.get(&filename).await?;
    Ok(Json(DocumentResponse {
        filename: doc.filename,
        byte_size: doc.byte_size,
        content: doc.content,
    }))
}

async fn delete_document(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.pipeline.remove(&filename).await?;
    Ok(Json(MessageResponse::new("Document deleted successfully")))
}
