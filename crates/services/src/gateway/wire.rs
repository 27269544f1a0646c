//! Raw JSON shapes of the hosted backend and their normalization.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use quiz_core::model::{
    AuthSession, Category, Day, DayStatus, ProgressMap, Question, QuestionDraft, QuestionId, User,
    UserId,
};

//
// ─── QUESTIONS ─────────────────────────────────────────────────────────────────
//

/// Row ids arrive as UUID strings or integers depending on the table setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Text(String),
    Number(i64),
}

impl RowId {
    fn into_question_id(self) -> QuestionId {
        match self {
            RowId::Text(text) => QuestionId::new(text),
            RowId::Number(number) => QuestionId::new(number.to_string()),
        }
    }
}

/// One `quiz_questions` row with every optional column the table has carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    pub day: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl QuestionRow {
    /// Normalize the row into a canonical `Question`.
    ///
    /// Prompt falls back `content` → `question` → `description`; solution
    /// falls back `solution` → `explanation`. A `correct_answer` that does not
    /// index into `options` is dropped.
    ///
    /// # Errors
    ///
    /// Returns `quiz_core::Error` when the category is blank or the question
    /// fails validation.
    pub fn into_question(self) -> Result<Question, quiz_core::Error> {
        let category = Category::new(&self.category)?;
        let id = self
            .id
            .map_or_else(|| QuestionId::new(format!("day-{}", self.day)), RowId::into_question_id);

        let description = non_blank(self.description);
        let prompt = non_blank(self.content)
            .or_else(|| non_blank(self.question))
            .or_else(|| description.clone())
            .unwrap_or_default();
        let solution = non_blank(self.solution)
            .or_else(|| non_blank(self.explanation))
            .unwrap_or_default();

        let mut draft = QuestionDraft::new(
            id,
            Day::new(self.day),
            self.title,
            category,
            prompt,
            solution,
        );
        if let Some(description) = description {
            draft = draft.with_description(description);
        }

        let options = self.options.unwrap_or_default();
        let correct = self
            .correct_answer
            .and_then(|index| usize::try_from(index).ok())
            .filter(|index| *index < options.len());
        draft.options = options;
        draft.correct_option = correct;

        Ok(draft.validate()?)
    }

    /// Insertable row for `question`; the backend assigns `id` and `created_at`.
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        let options = question.options();
        Self {
            id: None,
            day: question.day().value(),
            title: question.title().to_owned(),
            category: question.category().as_str().to_owned(),
            question: Some(question.prompt().to_owned()),
            solution: Some(question.solution().to_owned()),
            description: question.description().map(str::to_owned),
            content: None,
            options: (!options.is_empty()).then(|| options.to_vec()),
            correct_answer: question
                .correct_option()
                .and_then(|index| i64::try_from(index).ok()),
            explanation: None,
            created_at: None,
        }
    }
}

/// Normalize rows, skipping (and logging) any that fail validation.
#[must_use]
pub fn questions_from_rows(rows: Vec<QuestionRow>) -> Vec<Question> {
    let mut questions: Vec<Question> = rows
        .into_iter()
        .filter_map(|row| {
            let day = row.day;
            match row.into_question() {
                Ok(question) => Some(question),
                Err(err) => {
                    tracing::warn!(day, error = %err, "skipping invalid question row");
                    None
                }
            }
        })
        .collect();
    questions.sort_by_key(Question::day);
    questions
}

/// Decode raw rows one at a time so a single malformed row (for example a
/// `null` title) is skipped instead of failing the whole batch.
#[must_use]
pub fn questions_from_values(values: Vec<Value>) -> Vec<Question> {
    let rows = values
        .into_iter()
        .filter_map(|value| {
            let day = value.get("day").cloned();
            match serde_json::from_value::<QuestionRow>(value) {
                Ok(row) => Some(row),
                Err(err) => {
                    tracing::warn!(?day, error = %err, "skipping undecodable question row");
                    None
                }
            }
        })
        .collect();
    questions_from_rows(rows)
}

//
// ─── PROGRESS ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Serialize)]
pub struct ProgressUpsert<'a> {
    pub user_id: &'a str,
    pub progress_data: &'a ProgressMap,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressRow {
    #[serde(default)]
    pub progress_data: Value,
}

/// Lenient decode of a stored progress object.
///
/// Entries whose key is not a day number or whose value is not a known status
/// are skipped, so one bad entry does not discard the whole map.
#[must_use]
pub fn progress_from_value(value: &Value) -> ProgressMap {
    let Some(object) = value.as_object() else {
        return ProgressMap::new();
    };
    object
        .iter()
        .filter_map(|(key, raw)| {
            let day: Day = key.parse().ok()?;
            match serde_json::from_value::<DayStatus>(raw.clone()) {
                Ok(status) => Some((day, status)),
                Err(err) => {
                    tracing::debug!(%key, error = %err, "skipping progress entry");
                    None
                }
            }
        })
        .collect()
}

//
// ─── AUTH ──────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthUser {
    #[must_use]
    pub fn into_user(self) -> User {
        User::new(UserId::new(self.id), self.email)
    }
}

/// Token grant body. Sign-up without auto-confirm returns the bare user
/// instead, so every field is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

impl TokenResponse {
    /// `None` when the response carries no usable session.
    #[must_use]
    pub fn into_session(self, now: DateTime<Utc>) -> Option<AuthSession> {
        let access_token = self.access_token.filter(|token| !token.is_empty())?;
        let user = self.user?.into_user();
        Some(AuthSession {
            user,
            access_token,
            refresh_token: self.refresh_token,
            expires_at: self
                .expires_in
                .and_then(Duration::try_seconds)
                .and_then(|ttl| now.checked_add_signed(ttl)),
        })
    }
}

/// Error payloads from either the auth or the rows endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

pub const NO_ROWS_CODE: &str = "PGRST116";

impl ApiErrorBody {
    #[must_use]
    pub fn code_str(&self) -> Option<&str> {
        self.code.as_ref().and_then(Value::as_str)
    }

    #[must_use]
    pub fn is_no_rows(&self) -> bool {
        self.code_str() == Some(NO_ROWS_CODE)
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.error_description
            .clone()
            .or_else(|| self.msg.clone())
            .or_else(|| self.message.clone())
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "unknown error".to_owned())
    }
}
