use std::env;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use quiz_core::model::{AuthSession, Category, ProgressMap, Question, QuestionId, User, UserId};
use quiz_core::Clock;

use super::wire::{
    questions_from_values, progress_from_value, ApiErrorBody, AuthUser, Credentials, ProgressRow,
    ProgressUpsert, QuestionRow, RowId, TokenResponse,
};
use super::{QuestionAdmin, RemoteGateway, SignUpOutcome};
use crate::error::{ConfigError, GatewayError};

const QUESTIONS_TABLE: &str = "quiz_questions";
const PROGRESS_TABLE: &str = "user_progress";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub base_url: Url,
    pub anon_key: String,
}

impl SupabaseConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if `base_url` does not parse or `anon_key` is blank.
    pub fn new(base_url: &str, anon_key: impl Into<String>) -> Result<Self, ConfigError> {
        let anon_key = anon_key.into();
        if anon_key.trim().is_empty() {
            return Err(ConfigError::Empty("QUIZ_SUPABASE_ANON_KEY"));
        }
        let base_url = Url::parse(base_url).map_err(|source| ConfigError::InvalidUrl {
            name: "QUIZ_SUPABASE_URL",
            source,
        })?;
        Ok(Self { base_url, anon_key })
    }

    /// `Ok(None)` when `QUIZ_SUPABASE_URL` or `QUIZ_SUPABASE_ANON_KEY` is unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the variables are set but invalid.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let (Ok(url), Ok(key)) = (
            env::var("QUIZ_SUPABASE_URL"),
            env::var("QUIZ_SUPABASE_ANON_KEY"),
        ) else {
            return Ok(None);
        };
        if url.trim().is_empty() {
            return Ok(None);
        }
        Self::new(url.trim(), key).map(Some)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.as_str().trim_end_matches('/'))
    }
}

/// `RemoteGateway` over the Supabase HTTP API (GoTrue auth + PostgREST rows).
pub struct SupabaseGateway {
    client: Client,
    config: SupabaseConfig,
    clock: Clock,
    session: Mutex<Option<AuthSession>>,
}

impl SupabaseGateway {
    #[must_use]
    pub fn new(config: SupabaseConfig, clock: Clock) -> Self {
        Self {
            client: Client::new(),
            config,
            clock,
            session: Mutex::new(None),
        }
    }

    /// Adopt a previously obtained session.
    pub fn restore_session(&self, session: AuthSession) {
        self.store_session(Some(session));
    }

    fn store_session(&self, session: Option<AuthSession>) {
        match self.session.lock() {
            Ok(mut slot) => *slot = session,
            Err(poisoned) => *poisoned.into_inner() = session,
        }
    }

    fn access_token(&self) -> Option<String> {
        let slot = self.session.lock().ok()?;
        slot.as_ref().map(|s| s.access_token.clone())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let bearer = self
            .access_token()
            .unwrap_or_else(|| self.config.anon_key.clone());
        self.client
            .request(method, self.config.endpoint(path))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    fn rows(&self, method: Method, table: &str) -> RequestBuilder {
        self.request(method, &format!("rest/v1/{table}"))
    }

    async fn send(builder: RequestBuilder) -> Result<Response, GatewayError> {
        let response = builder.send().await?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(Self::error_from(response).await)
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, GatewayError> {
        let response = Self::send(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn error_from(response: Response) -> GatewayError {
        let status = response.status();
        let body: ApiErrorBody = response.json().await.unwrap_or_default();
        if body.is_no_rows() {
            return GatewayError::NotFound;
        }
        let message = body.text();
        tracing::warn!(status = status.as_u16(), %message, "backend request failed");
        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                GatewayError::Validation(message)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GatewayError::Unauthorized,
            StatusCode::NOT_FOUND => GatewayError::NotFound,
            other => GatewayError::Http {
                status: other.as_u16(),
                message,
            },
        }
    }

    async fn fetch_questions(
        &self,
        filter: Option<&Category>,
    ) -> Result<Vec<Question>, GatewayError> {
        let mut query = vec![("select", "*".to_owned()), ("order", "day.asc".to_owned())];
        if let Some(category) = filter {
            query.push(("category", format!("eq.{}", category.as_str())));
        }
        let rows: Vec<Value> =
            Self::send_json(self.rows(Method::GET, QUESTIONS_TABLE).query(&query)).await?;
        Ok(questions_from_values(rows))
    }
}

#[derive(Debug, Deserialize)]
struct InsertedRow {
    id: RowId,
}

#[derive(Debug, Serialize)]
struct Empty {}

#[async_trait]
impl RemoteGateway for SupabaseGateway {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, GatewayError> {
        let body: TokenResponse = Self::send_json(
            self.request(Method::POST, "auth/v1/signup")
                .json(&Credentials { email, password }),
        )
        .await?;
        match body.into_session(self.clock.now()) {
            Some(session) => {
                tracing::info!(user = %session.user.id, "signed up");
                self.store_session(Some(session.clone()));
                Ok(SignUpOutcome::SignedIn(session))
            }
            None => {
                tracing::info!("sign-up pending email confirmation");
                Ok(SignUpOutcome::ConfirmationRequired)
            }
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, GatewayError> {
        let body: TokenResponse = Self::send_json(
            self.request(Method::POST, "auth/v1/token")
                .query(&[("grant_type", "password")])
                .json(&Credentials { email, password }),
        )
        .await?;
        let session = body
            .into_session(self.clock.now())
            .ok_or_else(|| GatewayError::Decode("token response without session".into()))?;
        tracing::info!(user = %session.user.id, "signed in");
        self.store_session(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), GatewayError> {
        if self.access_token().is_none() {
            return Ok(());
        }
        let result = Self::send(self.request(Method::POST, "auth/v1/logout").json(&Empty {})).await;
        self.store_session(None);
        match result {
            Ok(_) | Err(GatewayError::Unauthorized) => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn current_user(&self) -> Result<Option<User>, GatewayError> {
        let expired = self
            .session
            .lock()
            .ok()
            .and_then(|slot| slot.as_ref().map(|s| s.is_expired(self.clock.now())));
        match expired {
            None => return Ok(None),
            Some(true) => {
                tracing::debug!("stored session expired");
                self.store_session(None);
                return Ok(None);
            }
            Some(false) => {}
        }

        match Self::send_json::<AuthUser>(self.request(Method::GET, "auth/v1/user")).await {
            Ok(user) => Ok(Some(user.into_user())),
            Err(GatewayError::Unauthorized) => {
                self.store_session(None);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn all_questions(&self) -> Result<Vec<Question>, GatewayError> {
        self.fetch_questions(None).await
    }

    async fn progress(&self, user_id: &UserId) -> Result<ProgressMap, GatewayError> {
        let request = self
            .rows(Method::GET, PROGRESS_TABLE)
            .query(&[
                ("select", "progress_data".to_owned()),
                ("user_id", format!("eq.{user_id}")),
            ])
            .header(reqwest::header::ACCEPT, SINGLE_OBJECT);
        match Self::send_json::<ProgressRow>(request).await {
            Ok(row) => Ok(progress_from_value(&row.progress_data)),
            Err(GatewayError::NotFound) => {
                tracing::debug!(user = %user_id, "no stored progress");
                Ok(ProgressMap::new())
            }
            Err(err) => Err(err),
        }
    }

    async fn save_progress(
        &self,
        user_id: &UserId,
        progress: &ProgressMap,
    ) -> Result<(), GatewayError> {
        let row = ProgressUpsert {
            user_id: user_id.as_str(),
            progress_data: progress,
            updated_at: self.clock.now(),
        };
        Self::send(
            self.rows(Method::POST, PROGRESS_TABLE)
                .query(&[("on_conflict", "user_id")])
                .header("Prefer", "resolution=merge-duplicates,return=minimal")
                .json(&row),
        )
        .await?;
        tracing::debug!(user = %user_id, days = progress.len(), "progress saved");
        Ok(())
    }
}

#[async_trait]
impl QuestionAdmin for SupabaseGateway {
    async fn questions_by_category(
        &self,
        category: &Category,
    ) -> Result<Vec<Question>, GatewayError> {
        self.fetch_questions(Some(category)).await
    }

    async fn add_question(&self, question: &Question) -> Result<QuestionId, GatewayError> {
        let rows: Vec<InsertedRow> = Self::send_json(
            self.rows(Method::POST, QUESTIONS_TABLE)
                .query(&[("select", "id")])
                .header("Prefer", "return=representation")
                .json(&[QuestionRow::from_question(question)]),
        )
        .await?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Decode("insert returned no rows".into()))?;
        Ok(match row.id {
            RowId::Text(text) => QuestionId::new(text),
            RowId::Number(number) => QuestionId::new(number.to_string()),
        })
    }

    async fn update_question(
        &self,
        id: &QuestionId,
        question: &Question,
    ) -> Result<(), GatewayError> {
        let updated: Vec<InsertedRow> = Self::send_json(
            self.rows(Method::PATCH, QUESTIONS_TABLE)
                .query(&[("id", format!("eq.{id}")), ("select", "id".to_owned())])
                .header("Prefer", "return=representation")
                .json(&QuestionRow::from_question(question)),
        )
        .await?;
        if updated.is_empty() {
            return Err(GatewayError::NotFound);
        }
        Ok(())
    }

    async fn delete_question(&self, id: &QuestionId) -> Result<(), GatewayError> {
        let deleted: Vec<InsertedRow> = Self::send_json(
            self.rows(Method::DELETE, QUESTIONS_TABLE)
                .query(&[("id", format!("eq.{id}")), ("select", "id".to_owned())])
                .header("Prefer", "return=representation"),
        )
        .await?;
        if deleted.is_empty() {
            return Err(GatewayError::NotFound);
        }
        Ok(())
    }

    async fn seed_questions(&self, questions: &[Question]) -> Result<usize, GatewayError> {
        let existing: Vec<InsertedRow> = Self::send_json(
            self.rows(Method::GET, QUESTIONS_TABLE)
                .query(&[("select", "id"), ("limit", "1")]),
        )
        .await?;
        if !existing.is_empty() {
            tracing::info!("question table already populated; skipping seed");
            return Ok(0);
        }
        let rows: Vec<QuestionRow> = questions.iter().map(QuestionRow::from_question).collect();
        Self::send(
            self.rows(Method::POST, QUESTIONS_TABLE)
                .header("Prefer", "return=minimal")
                .json(&rows),
        )
        .await?;
        tracing::info!(count = rows.len(), "seeded question table");
        Ok(rows.len())
    }
}
