use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::domain::{MessageRole, Turn};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Gemini `generateContent` client.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl Content {
    fn text(role: MessageRole, text: &str) -> Self {
        Self {
            role: Some(role.as_str().to_string()),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model,
            temperature: None,
            max_output_tokens: None,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_generation_config(
        mut self,
        temperature: Option<f32>,
        max_output_tokens: Option<u32>,
    ) -> Self {
        self.temperature = temperature;
        self.max_output_tokens = max_output_tokens;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request(&self, history: &[Turn], prompt: &str) -> GenerateContentRequest {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content::text(turn.role, &turn.text))
            .collect();
        contents.push(Content::text(MessageRole::User, prompt));

        let generation_config = (self.temperature.is_some() || self.max_output_tokens.is_some())
            .then(|| GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            });

        GenerateContentRequest {
            contents,
            generation_config,
        }
    }

    fn extract_reply(response: GenerateContentResponse) -> Result<String, LlmClientError> {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(LlmClientError::InvalidResponse(format!(
                "prompt blocked: {}",
                reason
            )));
        }

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(LlmClientError::InvalidResponse(
                "no text in response".to_string(),
            ));
        }

        Ok(text)
    }

    fn error_message(body: &str) -> String {
        serde_json::from_str::<ErrorEnvelope>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.to_string())
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    #[instrument(skip(self, history, prompt), fields(model = %self.model, history_turns = history.len()))]
    async fn generate(&self, history: &[Turn], prompt: &str) -> Result<String, LlmClientError> {
        let request_body = self.build_request(history, prompt);

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::RateLimited(Self::error_message(&body)));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status,
                Self::error_message(&body)
            )));
        }

        let generated: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        Self::extract_reply(generated)
    }
}
