use std::{env, path::PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::info;

const DEFAULT_CONFIG_PATH: &str = "config/app.yaml";
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upload_dir: PathBuf,
    pub limits: LimitsConfig,
    pub chat: ChatConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upload_dir: PathBuf::from("uploads"),
            limits: LimitsConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_upload_bytes: usize,
    pub upload_preview_chars: usize,
    pub list_preview_chars: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 16 * 1024 * 1024,
            upload_preview_chars: 500,
            list_preview_chars: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub model: String,
    pub max_tokens: u32,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 500,
            base_url: "https://api.openai.com".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Reads the YAML config, falling back to defaults when the file is absent.
pub async fn load_config() -> Result<AppConfig> {
    let path = config_path();
    if !path.exists() {
        info!(path = %path.display(), "No config file found, using defaults");
        return Ok(AppConfig::default());
    }

    let contents = fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    let config = parse_config(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
    info!(path = %path.display(), "Configuration loaded from disk");
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    if contents.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    Ok(serde_yaml::from_str(contents)?)
}

fn config_path() -> PathBuf {
    env::var("APP_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// The model credential, if one is configured. Blank values count as unset.
pub fn api_key_from_env() -> Option<String> {
    env::var(API_KEY_VAR)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() -> Result<()> {
        let config = parse_config("server:\n  port: 8080\nchat:\n  max_tokens: 256\n")?;
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.chat.max_tokens, 256);
        assert_eq!(config.chat.model, "gpt-3.5-turbo");
        assert_eq!(config.limits.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        Ok(())
    }

    #[test]
    fn empty_config_is_default() -> Result<()> {
        let config = parse_config("")?;
        assert_eq!(config.limits.upload_preview_chars, 500);
        assert_eq!(config.limits.list_preview_chars, 200);
        Ok(())
    }

    #[test]
    fn upload_dir_reads_plain_string() -> Result<()> {
        let config = parse_config("upload_dir: /tmp/docchat\n")?;
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/docchat"));
        Ok(())
    }
}
