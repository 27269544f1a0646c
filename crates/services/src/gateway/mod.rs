//! Access to the hosted backend: authentication plus question and progress rows.

use async_trait::async_trait;

use quiz_core::model::{AuthSession, Category, ProgressMap, Question, QuestionId, User, UserId};

use crate::error::GatewayError;

mod memory;
mod supabase;
pub mod wire;

pub use memory::InMemoryGateway;
pub use supabase::{SupabaseConfig, SupabaseGateway};

/// Result of a registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    SignedIn(AuthSession),
    /// The account exists but must be confirmed by email before signing in.
    ConfirmationRequired,
}

/// Authentication and per-user row storage.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Validation` when the backend rejects the
    /// credentials, or a transport error.
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, GatewayError>;

    /// Sign in with email and password and keep the session as current.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Validation` or `GatewayError::Unauthorized` for
    /// bad credentials, or a transport error.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, GatewayError>;

    /// Drop the current session. Succeeds when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the backend rejects the revocation.
    async fn sign_out(&self) -> Result<(), GatewayError>;

    /// The signed-in user, or `None`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure.
    async fn current_user(&self) -> Result<Option<User>, GatewayError>;

    /// Every question ordered by day ascending.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport or decode failure.
    async fn all_questions(&self) -> Result<Vec<Question>, GatewayError>;

    /// Stored progress for `user_id`; an empty map when none exists.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` on transport failure. Absence is not an error.
    async fn progress(&self, user_id: &UserId) -> Result<ProgressMap, GatewayError>;

    /// Upsert the full progress map for `user_id`. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the write is rejected.
    async fn save_progress(&self, user_id: &UserId, progress: &ProgressMap)
    -> Result<(), GatewayError>;
}

/// Question table maintenance, used by the `seed` command.
#[async_trait]
pub trait QuestionAdmin: Send + Sync {
    /// # Errors
    ///
    /// Returns `GatewayError` on transport or decode failure.
    async fn questions_by_category(
        &self,
        category: &Category,
    ) -> Result<Vec<Question>, GatewayError>;

    /// Insert `question`, returning the id the backend assigned.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the insert is rejected.
    async fn add_question(&self, question: &Question) -> Result<QuestionId, GatewayError>;

    /// Replace the stored fields of question `id`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if no row has `id`.
    async fn update_question(&self, id: &QuestionId, question: &Question)
    -> Result<(), GatewayError>;

    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if no row has `id`.
    async fn delete_question(&self, id: &QuestionId) -> Result<(), GatewayError>;

    /// Insert `questions` only when the table is empty; returns how many were inserted.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the check or the insert fails.
    async fn seed_questions(&self, questions: &[Question]) -> Result<usize, GatewayError>;
}
