use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use secrecy::{ExposeSecret as _, SecretString};

use crate::{
    config::Config,
    constants::quiz_prompt::QUESTION_COUNT,
    errors::{AppError, AppResult},
    models::{
        domain::question_record::{QuestionRecord, RawQuestionRecord},
        dto::generation::{ApiErrorBody, GenerateContentResponse, GenerationRequest},
    },
};

/// Turns a generation request into a validated list of questions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<Vec<QuestionRecord>>;
}

/// Single-shot client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl GeminiClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.gemini_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: config.generate_content_url(),
            api_key: config.gemini_api_key.clone(),
        })
    }
}

#[async_trait]
impl QuizGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<Vec<QuestionRecord>> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            AppError::ConfigurationError(
                "GEMINI_API_KEY is not set, quiz generation is unavailable".to_string(),
            )
        })?;

        log::info!("Requesting quiz from {}", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", api_key.expose_secret())])
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                // the URL carries the key
                let e = e.without_url();
                log::error!("Failed to reach the generation API: {}", e);
                AppError::RequestFailed(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::RequestFailed(e.without_url().to_string()))?;

        if !status.is_success() {
            let message = api_error_message(status, &body);
            log::error!("Generation API returned {}: {}", status.as_u16(), message);
            return Err(AppError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let text = extract_text(&body)?;
        let questions = parse_questions(&text)?;

        if questions.len() != QUESTION_COUNT {
            log::warn!(
                "Expected {} questions, the model returned {}",
                QUESTION_COUNT,
                questions.len()
            );
        }

        Ok(questions)
    }
}

/// Human-readable message for a failed call, falling back to the status reason.
pub fn api_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        })
}

/// Pulls the model's output text out of `candidates[0].content.parts[0].text`.
pub fn extract_text(body: &str) -> AppResult<String> {
    let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        AppError::EmptyResponse(format!("response body is not a generateContent reply: {}", e))
    })?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| AppError::EmptyResponse("no candidate text in response".to_string()))
}

/// Decodes the model output into questions. One bad record fails the whole batch.
pub fn parse_questions(text: &str) -> AppResult<Vec<QuestionRecord>> {
    let raw: Vec<RawQuestionRecord> = serde_json::from_str(text.trim()).map_err(|e| {
        AppError::MalformedContent(format!("response is not a valid question list: {}", e))
    })?;

    if raw.is_empty() {
        return Err(AppError::MalformedContent(
            "the model returned no questions".to_string(),
        ));
    }

    raw.into_iter()
        .enumerate()
        .map(|(index, record)| {
            QuestionRecord::validate(record).map_err(|e| match e {
                AppError::MalformedContent(reason) => {
                    AppError::MalformedContent(format!("question {}: {}", index + 1, reason))
                }
                other => other,
            })
        })
        .collect()
}
