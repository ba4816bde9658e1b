use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::non_blank_var;
use crate::error::ExplanationError;

/// Returned when the endpoint answers without any text.
pub const NOT_AVAILABLE_FALLBACK: &str = "Detailed explanation is not available.";
/// Returned when the request fails for any reason.
pub const FETCH_FAILED_FALLBACK: &str =
    "Could not fetch a detailed explanation. Please try again later.";

const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Supplies explanatory text for a question's correct answer.
///
/// Implementations never fail: any problem is folded into a fallback string.
#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    async fn explain(&self, question: &str, correct_answer: &str) -> String;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExplanationConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub language: String,
    pub timeout: Duration,
}

impl ExplanationConfig {
    /// `None` unless `QUIZ_AI_API_KEY` is set to something non-blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = non_blank_var("QUIZ_AI_API_KEY")?;
        let base_url =
            non_blank_var("QUIZ_AI_BASE_URL").unwrap_or_else(|| "https://api.openai.com/v1".into());
        let model = non_blank_var("QUIZ_AI_MODEL").unwrap_or_else(|| "gpt-4o-mini".into());
        let language = non_blank_var("QUIZ_AI_LANGUAGE").unwrap_or_else(|| "English".into());
        let timeout_secs = non_blank_var("QUIZ_AI_TIMEOUT_SECS")
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Some(Self {
            base_url,
            api_key,
            model,
            language,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Explanation provider backed by an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct ExplanationService {
    client: Client,
    config: Option<ExplanationConfig>,
}

impl ExplanationService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ExplanationConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<ExplanationConfig>) -> Self {
        let client = build_client(config.as_ref().map(|config| config.timeout));
        Self { client, config }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Ask the endpoint for an explanation.
    ///
    /// # Errors
    ///
    /// Returns `ExplanationError` when the service is disabled, the request fails,
    /// or the response carries no text.
    pub async fn generate(
        &self,
        question: &str,
        correct_answer: &str,
    ) -> Result<String, ExplanationError> {
        let config = self.config.as_ref().ok_or(ExplanationError::Disabled)?;

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: build_prompt(question, correct_answer, &config.language),
            }],
            temperature: 0.7,
            top_p: 0.9,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ExplanationError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ExplanationError::EmptyResponse)?;

        Ok(content)
    }
}

#[async_trait]
impl ExplanationProvider for ExplanationService {
    async fn explain(&self, question: &str, correct_answer: &str) -> String {
        match self.generate(question, correct_answer).await {
            Ok(text) => text,
            Err(ExplanationError::Disabled) => {
                log::debug!("explanations disabled; returning fallback");
                NOT_AVAILABLE_FALLBACK.to_string()
            }
            Err(ExplanationError::EmptyResponse) => NOT_AVAILABLE_FALLBACK.to_string(),
            Err(err) => {
                log::warn!("explanation request failed: {err}");
                FETCH_FAILED_FALLBACK.to_string()
            }
        }
    }
}

fn build_client(timeout: Option<Duration>) -> Client {
    let builder = Client::builder();
    let builder = match timeout {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    };
    builder.build().unwrap_or_else(|err| {
        log::warn!("falling back to default HTTP client: {err}");
        Client::new()
    })
}

fn build_prompt(question: &str, correct_answer: &str, language: &str) -> String {
    format!(
        "You are an expert Geography tutor. Provide a detailed, concise explanation in \
         {language} for the following question and correct answer related to Physical \
         Geography and Cosmology.\n\
         Question: {question}\n\
         Correct Answer: {correct_answer}\n\
         Format: Scientific context and explanation. Keep it under 100 words."
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
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
