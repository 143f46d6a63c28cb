use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    error::{AppError, AppResult},
    storage::{Document, DocumentStorage},
};

use super::{
    context,
    document_manager::DocumentManager,
    extractor::{DocumentExtractor, ExtractError},
    kind::DocumentKind,
};

/// A file as received at the upload boundary.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

pub struct Pipeline {
    store: Arc<dyn DocumentStorage>,
    doc_manager: DocumentManager,
    extractor: Arc<dyn DocumentExtractor>,
    max_upload_bytes: usize,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn DocumentStorage>,
        doc_manager: DocumentManager,
        extractor: Arc<dyn DocumentExtractor>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            store,
            doc_manager,
            extractor,
            max_upload_bytes,
        }
    }

    /// Validates, extracts, stores and persists one upload. Nothing is written
    /// to disk or to the store unless extraction succeeds.
    pub async fn ingest(&self, upload: Upload) -> AppResult<Document> {
        let Upload {
            filename,
            content_type,
            bytes,
        } = upload;

        if filename.trim().is_empty() {
            return Err(AppError::validation("No file selected"));
        }
        let filename = self
            .doc_manager
            .sanitize_filename(&filename)
            .map_err(|err| AppError::validation(format!("Invalid filename: {err}")))?;

        let kind = DocumentKind::resolve(&filename, content_type.as_deref())?;

        if bytes.len() > self.max_upload_bytes {
            return Err(AppError::PayloadTooLarge {
                limit: self.max_upload_bytes,
            });
        }

        let extractor = self.extractor.clone();
        let (extracted, bytes) = tokio::task::spawn_blocking(move || {
            let extracted = extractor.extract(&bytes, kind);
            (extracted, bytes)
        })
        .await
        .map_err(|err| {
            error!(filename = %filename, kind = %kind, error = %err, "extraction task panicked");
            ExtractError::Panicked(err.to_string())
        })?;

        let text = extracted
            .and_then(|text| {
                if text.trim().is_empty() {
                    Err(ExtractError::Empty)
                } else {
                    Ok(text)
                }
            })
            .map_err(|err| {
                error!(filename = %filename, kind = %kind, error = %err, "failed to extract text");
                AppError::from(err)
            })?;

        self.doc_manager.persist(&filename, &bytes).await?;

        let document = Document::new(filename, text, bytes.len());
        let replaced = self.store.put(document.clone()).await?;
        info!(
            filename = %document.filename,
            kind = %kind,
            byte_size = document.byte_size,
            replaced = replaced.is_some(),
            "document stored"
        );

        Ok(document)
    }

    /// Removes a document from the store and its copy from the upload dir.
    pub async fn remove(&self, filename: &str) -> AppResult<Document> {
        let document = self.store.delete(filename).await?;
        match self.doc_manager.remove(&document.filename).await {
            Ok(true) => {}
            Ok(false) => warn!(filename = %document.filename, "stored upload already gone"),
            Err(err) => warn!(filename = %document.filename, error = %err, "failed to remove stored upload"),
        }
        info!(filename = %document.filename, "document deleted");
        Ok(document)
    }

    pub async fn get(&self, filename: &str) -> AppResult<Document> {
        Ok(self.store.get(filename).await?)
    }

    pub async fn list(&self) -> AppResult<Vec<Document>> {
        Ok(self.store.list().await?)
    }

    pub async fn context(&self) -> AppResult<String> {
        Ok(context::assemble(self.store.as_ref()).await?)
    }
}
