//! Profile-scoped fallback persistence for anonymous users.
//!
//! Reads never fail: a missing key, malformed JSON, or a storage error all
//! yield the empty state. Writes log failures and return nothing.

use std::sync::Arc;

use quiz_core::model::{ProgressMap, Theme};

use crate::repository::KeyValueRepository;

const PROGRESS_KEY: &str = "quizProgress";
const THEME_KEY: &str = "theme";

#[derive(Clone)]
pub struct LocalPersistence {
    repo: Arc<dyn KeyValueRepository>,
    scope: String,
}

impl LocalPersistence {
    #[must_use]
    pub fn new(repo: Arc<dyn KeyValueRepository>, scope: impl Into<String>) -> Self {
        Self {
            repo,
            scope: scope.into(),
        }
    }

    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn key(&self, name: &str) -> String {
        format!("{}:{name}", self.scope)
    }

    pub async fn load(&self) -> ProgressMap {
        let key = self.key(PROGRESS_KEY);
        let raw = match self.repo.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return ProgressMap::new(),
            Err(err) => {
                tracing::warn!(%key, error = %err, "local progress read failed");
                return ProgressMap::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(progress) => progress,
            Err(err) => {
                tracing::debug!(%key, error = %err, "ignoring malformed local progress");
                ProgressMap::new()
            }
        }
    }

    pub async fn save(&self, progress: &ProgressMap) {
        let key = self.key(PROGRESS_KEY);
        let encoded = match serde_json::to_string(progress) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!(%key, error = %err, "local progress encode failed");
                return;
            }
        };
        if let Err(err) = self.repo.set(&key, &encoded).await {
            tracing::warn!(%key, error = %err, "local progress write failed");
        }
    }

    pub async fn clear(&self) {
        let key = self.key(PROGRESS_KEY);
        if let Err(err) = self.repo.remove(&key).await {
            tracing::warn!(%key, error = %err, "local progress clear failed");
        }
    }

    /// `None` when nothing usable is stored.
    pub async fn load_theme(&self) -> Option<Theme> {
        let key = self.key(THEME_KEY);
        match self.repo.get(&key).await {
            Ok(raw) => raw.and_then(|raw| raw.parse().ok()),
            Err(err) => {
                tracing::warn!(%key, error = %err, "local theme read failed");
                None
            }
        }
    }

    pub async fn save_theme(&self, theme: Theme) {
        let key = self.key(THEME_KEY);
        if let Err(err) = self.repo.set(&key, theme.as_str()).await {
            tracing::warn!(%key, error = %err, "local theme write failed");
        }
    }
}
