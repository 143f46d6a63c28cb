use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tokio::time::Duration;
use tracing::debug;

use super::{CompletionRequest, LanguageModel};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct CompletionsClient {
    http: Client,
    api_key: String,
    base: String,
}

impl CompletionsClient {
    pub fn new(api_key: String, base: Option<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        let base = base
            .map(|base| base.trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.into());
        Ok(Self {
            http,
            api_key,
            base,
        })
    }

    async fn post_json(&self, path: &str, body: &Value) -> reqwest::Result<reqwest::Response> {
        self.http
            .post(format!("{}/v1{}", self.base, path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
    }

    fn extract_message_content(root: &Value) -> Option<String> {
        let content = root
            .get("choices")?
            .as_array()?
            .first()?
            .get("message")?
            .get("content")?;

        match content {
            Value::String(text) => Some(text.clone()),
            Value::Array(parts) => {
                let text: String = parts
                    .iter()
                    .filter_map(|part| part.get("text").and_then(Value::as_str))
                    .collect();
                Some(text)
            }
            _ => None,
        }
    }

    fn error_detail(body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.trim().to_string())
    }
}

#[async_trait]
impl LanguageModel for CompletionsClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String> {
        let body = json!({
            "model": request.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user }
            ],
            "max_tokens": request.max_tokens,
        });

        let resp = self
            .post_json("/chat/completions", &body)
            .await
            .context("Network error calling chat completions")?;

        let status = resp.status();
        if !status.is_success() {
            let err_txt = resp.text().await.unwrap_or_default();
            bail!("OpenAI error {}: {}", status, Self::error_detail(&err_txt));
        }

        let v: Value = resp
            .json()
            .await
            .context("Malformed response from chat completions")?;
        debug!(model = request.model, "chat completion received");

        match Self::extract_message_content(&v) {
            Some(text) => Ok(text),
            None => bail!("Chat completion response has no message content"),
        }
    }
}
