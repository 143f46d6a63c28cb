use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod history;
pub mod memory;

pub use history::{ChatHistory, ChatTurn};
pub use memory::MemoryDocumentStore;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("document not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Extracted text of one uploaded file, keyed by its filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub filename: String,
    pub content: String,
    pub byte_size: usize,
}

impl Document {
    pub fn new(filename: impl Into<String>, content: impl Into<String>, byte_size: usize) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            byte_size,
        }
    }
}

/// Filename-keyed document storage. `list` yields documents in insertion
/// order; overwriting an existing filename keeps its original position.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Inserts or replaces a document, returning the replaced entry.
    async fn put(&self, document: Document) -> StorageResult<Option<Document>>;

    async fn get(&self, filename: &str) -> StorageResult<Document>;

    async fn delete(&self, filename: &str) -> StorageResult<Document>;

    async fn list(&self) -> StorageResult<Vec<Document>>;
}
