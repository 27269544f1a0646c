use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use quiz_core::model::{
    AuthSession, Category, ProgressMap, Question, QuestionId, User, UserId,
};

use super::{QuestionAdmin, RemoteGateway, SignUpOutcome};
use crate::error::GatewayError;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    user: User,
    password: String,
    confirmed: bool,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<String, Account>,
    session: Option<AuthSession>,
    questions: Vec<Question>,
    progress: HashMap<UserId, ProgressMap>,
    next_id: u64,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

/// In-process backend with the same observable behaviour as the hosted one.
///
/// Used when no backend URL is configured and as the fake in tests.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    state: Arc<Mutex<State>>,
    offline: Arc<AtomicBool>,
    require_confirmation: Arc<AtomicBool>,
    progress_writes: Arc<AtomicUsize>,
}

impl InMemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_questions(questions: Vec<Question>) -> Self {
        let gateway = Self::new();
        if let Ok(mut state) = gateway.state.lock() {
            state.questions = questions;
        }
        gateway
    }

    /// While set, every call fails with `GatewayError::Network`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// New accounts must be confirmed with `confirm_email` before signing in.
    pub fn set_require_confirmation(&self, required: bool) {
        self.require_confirmation.store(required, Ordering::SeqCst);
    }

    /// Mark the account for `email` as confirmed. Returns false if unknown.
    #[must_use]
    pub fn confirm_email(&self, email: &str) -> bool {
        let Ok(mut state) = self.state.lock() else {
            return false;
        };
        match state.accounts.get_mut(&normalize_email(email)) {
            Some(account) => {
                account.confirmed = true;
                true
            }
            None => false,
        }
    }

    /// Number of successful `save_progress` calls so far.
    #[must_use]
    pub fn progress_writes(&self) -> usize {
        self.progress_writes.load(Ordering::SeqCst)
    }

    /// Stored progress for `user_id`, bypassing the offline switch.
    #[must_use]
    pub fn stored_progress(&self, user_id: &UserId) -> Option<ProgressMap> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.progress.get(user_id).cloned())
    }

    /// Seed progress for `user_id` directly.
    pub fn put_progress(&self, user_id: &UserId, progress: ProgressMap) {
        if let Ok(mut state) = self.state.lock() {
            state.progress.insert(user_id.clone(), progress);
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, State>, GatewayError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(GatewayError::Network("backend unreachable".into()));
        }
        self.state
            .lock()
            .map_err(|e| GatewayError::Network(e.to_string()))
    }

    fn open_session(state: &mut State, user: User) -> AuthSession {
        let token = state.next_id("token");
        let session = AuthSession {
            user,
            access_token: token,
            refresh_token: None,
            expires_at: None,
        };
        state.session = Some(session.clone());
        session
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn sorted_by_day(mut questions: Vec<Question>) -> Vec<Question> {
    questions.sort_by_key(Question::day);
    questions
}

#[async_trait]
impl RemoteGateway for InMemoryGateway {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, GatewayError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(GatewayError::Validation("Email is required".into()));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(GatewayError::Validation(format!(
                "Password should be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let require_confirmation = self.require_confirmation.load(Ordering::SeqCst);
        let mut state = self.state()?;
        if state.accounts.contains_key(&email) {
            return Err(GatewayError::Validation("User already registered".into()));
        }
        let user = User::new(UserId::new(state.next_id("user")), Some(email.clone()));
        state.accounts.insert(
            email,
            Account {
                user: user.clone(),
                password: password.to_owned(),
                confirmed: !require_confirmation,
            },
        );

        if require_confirmation {
            return Ok(SignUpOutcome::ConfirmationRequired);
        }
        Ok(SignUpOutcome::SignedIn(Self::open_session(&mut state, user)))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, GatewayError> {
        let mut state = self.state()?;
        let account = state
            .accounts
            .get(&normalize_email(email))
            .filter(|account| account.password == password)
            .cloned()
            .ok_or_else(|| GatewayError::Validation("Invalid login credentials".into()))?;
        if !account.confirmed {
            return Err(GatewayError::Validation("Email not confirmed".into()));
        }
        Ok(Self::open_session(&mut state, account.user))
    }

    async fn sign_out(&self) -> Result<(), GatewayError> {
        self.state()?.session = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<User>, GatewayError> {
        Ok(self.state()?.session.as_ref().map(|s| s.user.clone()))
    }

    async fn all_questions(&self) -> Result<Vec<Question>, GatewayError> {
        Ok(sorted_by_day(self.state()?.questions.clone()))
    }

    async fn progress(&self, user_id: &UserId) -> Result<ProgressMap, GatewayError> {
        Ok(self
            .state()?
            .progress
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_progress(
        &self,
        user_id: &UserId,
        progress: &ProgressMap,
    ) -> Result<(), GatewayError> {
        let mut state = self.state()?;
        if state.session.as_ref().map(|s| &s.user.id) != Some(user_id) {
            return Err(GatewayError::Unauthorized);
        }
        state.progress.insert(user_id.clone(), progress.clone());
        self.progress_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl QuestionAdmin for InMemoryGateway {
    async fn questions_by_category(
        &self,
        category: &Category,
    ) -> Result<Vec<Question>, GatewayError> {
        let state = self.state()?;
        let matching = state
            .questions
            .iter()
            .filter(|q| q.category() == category)
            .cloned()
            .collect();
        Ok(sorted_by_day(matching))
    }

    async fn add_question(&self, question: &Question) -> Result<QuestionId, GatewayError> {
        let mut state = self.state()?;
        let id = QuestionId::new(state.next_id("q"));
        state.questions.push(question.clone().with_id(id.clone()));
        Ok(id)
    }

    async fn update_question(
        &self,
        id: &QuestionId,
        question: &Question,
    ) -> Result<(), GatewayError> {
        let mut state = self.state()?;
        let slot = state
            .questions
            .iter_mut()
            .find(|q| q.id() == id)
            .ok_or(GatewayError::NotFound)?;
        *slot = question.clone().with_id(id.clone());
        Ok(())
    }

    async fn delete_question(&self, id: &QuestionId) -> Result<(), GatewayError> {
        let mut state = self.state()?;
        let before = state.questions.len();
        state.questions.retain(|q| q.id() != id);
        if state.questions.len() == before {
            return Err(GatewayError::NotFound);
        }
        Ok(())
    }

    async fn seed_questions(&self, questions: &[Question]) -> Result<usize, GatewayError> {
        let mut state = self.state()?;
        if !state.questions.is_empty() {
            return Ok(0);
        }
        state.questions.extend_from_slice(questions);
        Ok(questions.len())
    }
}
