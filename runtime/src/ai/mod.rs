use anyhow::Result;
use async_trait::async_trait;

pub mod completions;
pub mod responder;

pub use completions::CompletionsClient;
pub use responder::{ChatResponder, Reply, ReplySource, ResponderConfig};

#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub user: &'a str,
    pub max_tokens: u32,
}

/// The external chat model: one system instruction plus one user prompt in,
/// generated text out.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String>;
}
