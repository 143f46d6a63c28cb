use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Document, DocumentStorage, StorageError, StorageResult};

/// Process-lifetime document store.
#[derive(Default, Clone)]
pub struct MemoryDocumentStore {
    data: Arc<RwLock<Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStorage for MemoryDocumentStore {
    async fn put(&self, document: Document) -> StorageResult<Option<Document>> {
        let mut guard = self.data.write().await;
        if let Some(index) = guard
            .iter()
            .position(|existing| existing.filename == document.filename)
        {
            return Ok(Some(std::mem::replace(&mut guard[index], document)));
        }
        guard.push(document);
        Ok(None)
    }

    async fn get(&self, filename: &str) -> StorageResult<Document> {
        let guard = self.data.read().await;
        guard
            .iter()
            .find(|doc| doc.filename == filename)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(filename.to_string()))
    }

    async fn delete(&self, filename: &str) -> StorageResult<Document> {
        let mut guard = self.data.write().await;
        let index = guard
            .iter()
            .position(|doc| doc.filename == filename)
            .ok_or_else(|| StorageError::NotFound(filename.to_string()))?;
        Ok(guard.remove(index))
    }

    async fn list(&self) -> StorageResult<Vec<Document>> {
        Ok(self.data.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filenames(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|doc| doc.filename.as_str()).collect()
    }

    #[tokio::test]
    async fn put_then_get_returns_stored_text() -> anyhow::Result<()> {
        let store = MemoryDocumentStore::new();
        let previous = store.put(Document::new("notes.txt", "Hello world", 11)).await?;
        assert!(previous.is_none());

        let doc = store.get("notes.txt").await?;
        assert_eq!(doc.content, "Hello world");
        assert_eq!(doc.byte_size, 11);
        Ok(())
    }

    #[tokio::test]
    async fn overwrite_keeps_insertion_position() -> anyhow::Result<()> {
        let store = MemoryDocumentStore::new();
        store.put(Document::new("a.txt", "first", 5)).await?;
        store.put(Document::new("b.txt", "second", 6)).await?;
        store.put(Document::new("c.txt", "third", 5)).await?;

        let replaced = store.put(Document::new("a.txt", "rewritten", 9)).await?;
        assert_eq!(replaced.map(|doc| doc.content), Some("first".to_string()));

        let docs = store.list().await?;
        assert_eq!(filenames(&docs), vec!["a.txt", "b.txt", "c.txt"]);
        assert_eq!(docs[0].content, "rewritten");
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() -> anyhow::Result<()> {
        let store = MemoryDocumentStore::new();
        store.put(Document::new("notes.txt", "Hello world", 11)).await?;

        let removed = store.delete("notes.txt").await?;
        assert_eq!(removed.filename, "notes.txt");
        assert!(matches!(
            store.get("notes.txt").await,
            Err(StorageError::NotFound(name)) if name == "notes.txt"
        ));
        assert!(store.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn deleting_missing_key_reports_not_found() -> anyhow::Result<()> {
        let store = MemoryDocumentStore::new();
        store.put(Document::new("keep.txt", "kept", 4)).await?;

        assert!(matches!(
            store.delete("missing.txt").await,
            Err(StorageError::NotFound(_))
        ));
        assert_eq!(store.list().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn reinserting_after_delete_appends() -> anyhow::Result<()> {
        let store = MemoryDocumentStore::new();
        store.put(Document::new("a.txt", "a", 1)).await?;
        store.put(Document::new("b.txt", "b", 1)).await?;
        store.delete("a.txt").await?;
        store.put(Document::new("a.txt", "a again", 7)).await?;

        let docs = store.list().await?;
        assert_eq!(filenames(&docs), vec!["b.txt", "a.txt"]);
        Ok(())
    }
}
