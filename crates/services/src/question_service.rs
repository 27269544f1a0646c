use std::sync::Arc;

use quiz_core::QuestionCatalog;
use quiz_core::model::Day;

use crate::error::GatewayError;
use crate::gateway::RemoteGateway;

/// Loads the question deck shown by the quiz views.
#[derive(Clone)]
pub struct QuestionService {
    gateway: Arc<dyn RemoteGateway>,
}

impl QuestionService {
    #[must_use]
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self { gateway }
    }

    /// Remote questions, or the built-in deck when the remote table is empty.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the remote read fails; the caller decides
    /// whether to retry.
    pub async fn load_catalog(&self) -> Result<QuestionCatalog, GatewayError> {
        let questions = self.gateway.all_questions().await?;
        if questions.is_empty() {
            tracing::info!("no remote questions; using built-in deck");
            return Ok(QuestionCatalog::builtin());
        }
        tracing::debug!(count = questions.len(), "loaded remote questions");
        Ok(QuestionCatalog::new(questions))
    }

    /// Day after the highest one stored remotely; day 1 on an empty table.
    ///
    /// Unlike `load_catalog` this never looks at the built-in deck, so new
    /// rows extend what the backend actually holds.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` when the remote read fails.
    pub async fn next_remote_day(&self) -> Result<Day, GatewayError> {
        let questions = self.gateway.all_questions().await?;
        Ok(questions
            .iter()
            .map(|question| question.day())
            .max()
            .map_or_else(|| Day::new(1), |day| day.next()))
    }
}
