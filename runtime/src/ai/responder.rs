use std::sync::Arc;

use tracing::{info, warn};

use super::{CompletionRequest, LanguageModel};

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant that answers questions based on uploaded documents. Be concise and cite specific parts of the documents when relevant.";

pub const NO_CREDENTIAL_WITH_DOCUMENTS: &str = "I can see you've uploaded documents, but I need an OpenAI API key to answer questions about them. Please add your OPENAI_API_KEY to the .env file.";

pub const NO_CREDENTIAL_NO_DOCUMENTS: &str =
    "Please upload some documents first so I can help answer questions about them.";

#[derive(Clone, Debug)]
pub struct ResponderConfig {
    pub model: String,
    pub max_tokens: u32,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Model,
    Fallback,
    Failure,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::Model => "model",
            ReplySource::Fallback => "fallback",
            ReplySource::Failure => "failure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

impl Reply {
    fn new(text: impl Into<String>, source: ReplySource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

pub struct ChatResponder {
    model: Option<Arc<dyn LanguageModel>>,
    config: ResponderConfig,
}

impl ChatResponder {
    /// `model` is `None` when no credential is configured; every reply is
    /// then a canned fallback.
    pub fn new(model: Option<Arc<dyn LanguageModel>>, config: ResponderConfig) -> Self {
        Self { model, config }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    pub async fn respond(&self, user_message: &str, context: &str) -> Reply {
        let Some(model) = self.model.as_ref() else {
            return fallback_reply(context);
        };

        let prompt = build_prompt(user_message, context);
        let request = CompletionRequest {
            model: &self.config.model,
            system: SYSTEM_INSTRUCTION,
            user: &prompt,
            max_tokens: self.config.max_tokens,
        };

        match model.complete(request).await {
            Ok(text) => {
                info!(
                    model = %self.config.model,
                    with_documents = !context.is_empty(),
                    "model reply received"
                );
                Reply::new(text, ReplySource::Model)
            }
            Err(err) => {
                warn!(model = %self.config.model, error = %format!("{err:#}"), "model call failed");
                Reply::new(
                    format!("Error processing your request: {err:#}"),
                    ReplySource::Failure,
                )
            }
        }
    }
}

pub fn build_prompt(user_message: &str, context: &str) -> String {
    if context.is_empty() {
        format!(
            "User question: {user_message}\n\nNote: No documents have been uploaded yet. \
             Please ask the user to upload documents first if their question is about specific documents."
        )
    } else {
        format!(
            "Based on the following documents:\n\n{context}\n\nUser question: {user_message}\n\n\
             Please answer the question based on the provided documents."
        )
    }
}

pub fn fallback_reply(context: &str) -> Reply {
    let text = if context.is_empty() {
        NO_CREDENTIAL_NO_DOCUMENTS
    } else {
        NO_CREDENTIAL_WITH_DOCUMENTS
    };
    Reply::new(text, ReplySource::Fallback)
}
