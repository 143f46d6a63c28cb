use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub user_message: String,
    pub reply: String,
    pub created_at: DateTime<Utc>,
}

/// Ordered record of answered chat turns. Never fed back into prompts.
#[derive(Default, Clone)]
pub struct ChatHistory {
    turns: Arc<RwLock<Vec<ChatTurn>>>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, user_message: impl Into<String>, reply: impl Into<String>) {
        let turn = ChatTurn {
            user_message: user_message.into(),
            reply: reply.into(),
            created_at: Utc::now(),
        };
        self.turns.write().await.push(turn);
    }

    pub async fn turns(&self) -> Vec<ChatTurn> {
        self.turns.read().await.clone()
    }

    /// Drops every turn, returning how many were removed.
    pub async fn clear(&self) -> usize {
        let mut guard = self.turns.write().await;
        let removed = guard.len();
        guard.clear();
        removed
    }
}
