use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use quiz_core::model::{Category, Day, Difficulty, Question, QuestionDraft, QuestionId};

use crate::error::{ConfigError, GeneratorError};

const SYSTEM_PROMPT: &str = "You are an expert poker tournament strategy coach specializing in \
Texas Hold'em. Your expertise includes GTO (Game Theory Optimal) strategy, ICM (Independent \
Chip Model), and tournament-specific adjustments.";

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub base_url: Url,
    pub api_key: String,
    pub model: String,
}

impl GeneratorConfig {
    /// `Ok(None)` unless `QUIZ_AI_API_KEY` is set and non-blank.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `QUIZ_AI_BASE_URL` does not parse.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(api_key) = env::var("QUIZ_AI_API_KEY") else {
            return Ok(None);
        };
        if api_key.trim().is_empty() {
            return Ok(None);
        }
        let base_url =
            env::var("QUIZ_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let base_url = Url::parse(&base_url).map_err(|source| ConfigError::InvalidUrl {
            name: "QUIZ_AI_BASE_URL",
            source,
        })?;
        let model = env::var("QUIZ_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Ok(Some(Self {
            base_url,
            api_key,
            model,
        }))
    }
}

/// What to ask the model for.
#[derive(Clone, Debug)]
pub struct GenerationRequest {
    pub category: Category,
    pub difficulty: Difficulty,
    pub topic: Option<String>,
}

impl GenerationRequest {
    #[must_use]
    pub fn new(category: Category) -> Self {
        Self {
            category,
            difficulty: Difficulty::Intermediate,
            topic: None,
        }
    }

    fn prompt(&self) -> String {
        let mut prompt = format!(
            "Generate a detailed Texas Hold'em poker tournament quiz question for the {} stage \
             of a tournament.",
            self.category
        );
        if let Some(topic) = self.topic.as_deref().filter(|t| !t.trim().is_empty()) {
            prompt.push_str(&format!(" The question should focus on {}.", topic.trim()));
        }
        prompt.push_str(&format!(
            " The difficulty level should be {}.",
            self.difficulty.label().to_lowercase()
        ));
        prompt.push_str(&format!(
            " Format the response as a JSON object with the following structure: \
             {{\"title\": \"A concise title for the question\", \"category\": \"{}\", \
             \"question\": \"The detailed question scenario with all relevant information\", \
             \"solution\": \"A comprehensive explanation of the optimal strategy and reasoning\"}}",
            self.category
        ));
        prompt
    }
}

/// Model output, before it is turned into a stored question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub title: String,
    pub category: String,
    pub question: String,
    pub solution: String,
}

impl GeneratedQuestion {
    /// Turn the reply into a reveal-only question for `day`.
    ///
    /// # Errors
    ///
    /// Returns `quiz_core::Error` if the category is blank or a required
    /// field is empty.
    pub fn into_question(self, day: Day) -> Result<Question, quiz_core::Error> {
        let category = Category::new(&self.category)?;
        let draft = QuestionDraft::new(
            QuestionId::new(format!("generated-{}", day.value())),
            day,
            self.title,
            category,
            self.question,
            self.solution,
        );
        Ok(draft.validate()?)
    }
}

/// Chat-completion client that drafts new quiz questions.
#[derive(Clone)]
pub struct QuizGenerator {
    client: Client,
    config: Option<GeneratorConfig>,
}

impl QuizGenerator {
    #[must_use]
    pub fn new(config: Option<GeneratorConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Ask the model for one question.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError` when generation is disabled, the request fails,
    /// the reply is empty, or the reply is not the expected JSON object.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedQuestion, GeneratorError> {
        let config = self.config.as_ref().ok_or(GeneratorError::Disabled)?;

        let url = format!(
            "{}/chat/completions",
            config.base_url.as_str().trim_end_matches('/')
        );
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt(),
                },
            ],
            temperature: 0.7,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        tracing::debug!(category = %request.category, model = %config.model, "requesting question");
        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "question generation failed");
            return Err(GeneratorError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GeneratorError::EmptyResponse)?;

        Ok(serde_json::from_str(content.trim())?)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn generator(server: &Server) -> QuizGenerator {
        QuizGenerator::new(Some(GeneratorConfig {
            base_url: Url::parse(&server.url()).unwrap(),
            api_key: "sk-test".into(),
            model: "gpt-4o-mini".into(),
        }))
    }

    fn request() -> GenerationRequest {
        let mut request = GenerationRequest::new(Category::new("bubble").unwrap());
        request.topic = Some("short-stack shoves".into());
        request
    }

    #[tokio::test]
    async fn disabled_without_config() {
        let generator = QuizGenerator::new(None);
        assert!(!generator.enabled());
        assert!(matches!(
            generator.generate(&request()).await,
            Err(GeneratorError::Disabled)
        ));
    }

    #[test]
    fn prompt_mentions_category_topic_and_difficulty() {
        let prompt = request().prompt();
        assert!(prompt.contains("bubble stage"));
        assert!(prompt.contains("focus on short-stack shoves"));
        assert!(prompt.contains("difficulty level should be intermediate"));
        assert!(prompt.contains(r#""category": "bubble""#));
    }

    #[tokio::test]
    async fn parses_json_reply() {
        let mut server = Server::new_async().await;
        let reply = serde_json::json!({
            "choices": [{"message": {"content": serde_json::json!({
                "title": "Bubble pressure",
                "category": "bubble",
                "question": "You cover the table...",
                "solution": "Shove wide."
            }).to_string()}}]
        });
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4o-mini",
                "response_format": {"type": "json_object"}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(reply.to_string())
            .create_async()
            .await;

        let generated = generator(&server).generate(&request()).await.unwrap();
        assert_eq!(generated.title, "Bubble pressure");
        assert_eq!(generated.solution, "Shove wide.");
        mock.assert_async().await;
    }

    #[test]
    fn generated_question_becomes_reveal_only_question() {
        let generated = GeneratedQuestion {
            title: "Bubble pressure".into(),
            category: "Bubble".into(),
            question: "You cover the table...".into(),
            solution: "Shove wide.".into(),
        };
        let question = generated.clone().into_question(Day::new(9)).unwrap();
        assert_eq!(question.day(), Day::new(9));
        assert_eq!(question.category().as_str(), "bubble");
        assert!(!question.is_multiple_choice());

        let blank = GeneratedQuestion {
            question: " ".into(),
            ..generated
        };
        assert!(blank.into_question(Day::new(9)).is_err());
    }

    #[tokio::test]
    async fn non_json_reply_is_malformed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"Sure! Here is a question."}}]}"#)
            .create_async()
            .await;

        assert!(matches!(
            generator(&server).generate(&request()).await,
            Err(GeneratorError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn http_failure_surfaces_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .create_async()
            .await;

        assert!(matches!(
            generator(&server).generate(&request()).await,
            Err(GeneratorError::HttpStatus(status)) if status.as_u16() == 429
        ));
    }
}
