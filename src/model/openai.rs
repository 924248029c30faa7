//! OpenAI chat-completions implementation of [`LanguageModel`]

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::error::{AgentError, Result};
use crate::types::Message;

use super::{LanguageModel, SamplingParams};

const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client for the OpenAI chat-completions API
#[derive(Clone)]
pub struct OpenAiModel {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiModel {
    /// Create a client with the provided API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Create a client from the `OPENAI_API_KEY` environment variable
    ///
    /// # Errors
    /// Returns [`AgentError::InvalidConfig`] if the variable is unset.
    pub fn try_from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            AgentError::invalid_config("OPENAI_API_KEY not found in environment variables")
        })?;
        Ok(Self::new(api_key))
    }

    /// Override the endpoint, e.g. for an API-compatible proxy
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl LanguageModel for OpenAiModel {
    async fn complete(
        &self,
        model: &str,
        messages: &[Message],
        params: &SamplingParams,
    ) -> Result<String> {
        let request = ChatRequest {
            model,
            messages: messages.iter().map(ChatMessage::from).collect(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
            frequency_penalty: params.frequency_penalty,
            presence_penalty: params.presence_penalty,
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match status {
                StatusCode::UNAUTHORIZED => "invalid or expired API key".to_string(),
                StatusCode::TOO_MANY_REQUESTS => "rate limited by the API".to_string(),
                _ => truncate_body(&body),
            };
            return Err(AgentError::api(message, Some(status.as_u16())));
        }

        let body = response.text().await?;
        let completion: ChatResponse = serde_json::from_str(&body)?;
        let reply = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        Ok(reply)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 512;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a Message> for ChatMessage<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            role: message.role.api_str(),
            content: &message.content,
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}
