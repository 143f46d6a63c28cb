use crate::storage::{Document, DocumentStorage, StorageResult};

/// Concatenates every stored document into the prompt context, in store
/// order. An empty store yields an empty string.
pub async fn assemble(store: &dyn DocumentStorage) -> StorageResult<String> {
    let documents = store.list().await?;
    Ok(render_context(&documents))
}

pub fn render_context(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| format!("Document: {}\nContent: {}", doc.filename, doc.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}
