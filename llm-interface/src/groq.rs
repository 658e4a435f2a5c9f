use crate::{CompletionRequest, CompletionService};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use simulator_core::{CompletionConfig, CompletionError, CoreError};
use std::time::Duration;
use tracing::{debug, error};

const PROVIDER: &str = "groq";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Completion client for Groq's OpenAI-compatible chat endpoint.
#[derive(Debug)]
pub struct GroqClient {
    http: Client,
    config: CompletionConfig,
}

impl GroqClient {
    pub fn new(config: CompletionConfig) -> Result<Self, CoreError> {
        let http = Client::builder().timeout(Duration::from_secs(60)).build()?;
        Ok(Self { http, config })
    }
}

impl CompletionService for GroqClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CoreError> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let body = ChatCompletionBody {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(
            "Requesting completion from {} (max_tokens={}, temperature={})",
            self.config.model, request.max_tokens, request.temperature
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Network error for chat completion: {}", e);
                if e.is_timeout() {
                    CoreError::Completion(CompletionError::RequestTimeout {
                        provider: PROVIDER.to_string(),
                    })
                } else {
                    CoreError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Completion request failed with status {}", status);
            return Err(CoreError::Completion(classify_status(
                status,
                retry_after_seconds(&response),
                &self.config.model,
            )));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!("Failed to parse completion response: {}", e);
            CoreError::Completion(CompletionError::InvalidResponseFormat {
                provider: PROVIDER.to_string(),
            })
        })?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(CompletionError::EmptyResponse)?;

        debug!("Completion returned {} chars", text.len());
        Ok(text)
    }
}

fn retry_after_seconds(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
}

fn classify_status(status: StatusCode, retry_after: Option<u64>, model: &str) -> CompletionError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::InvalidApiKey {
            provider: PROVIDER.to_string(),
        },
        StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimitExceeded {
            provider: PROVIDER.to_string(),
            retry_after: retry_after.unwrap_or(60),
        },
        StatusCode::NOT_FOUND => CompletionError::ModelNotAvailable {
            model: model.to_string(),
        },
        status if status.is_server_error() => CompletionError::ServiceUnavailable {
            provider: PROVIDER.to_string(),
        },
        _ => CompletionError::InvalidResponseFormat {
            provider: PROVIDER.to_string(),
        },
    }
}
