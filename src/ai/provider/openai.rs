//! OpenAI-compatible chat-completions client
//!
//! One POST per request, no streaming, no retry. The response envelope is
//! parsed into typed structs so a malformed body is reported as
//! [`AiError::Parse`] rather than a transport failure.

use serde::{Deserialize, Serialize};

use super::{AiError, CompletionBackend};
use crate::ai::request::GenerationRequest;
use crate::config::GatewayConfig;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Chat-completions client configured once at startup
pub struct OpenAiClient {
    api_key: String,
    model: String,
    endpoint: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl OpenAiClient {
    /// Build a client from validated gateway settings
    pub fn new(config: &GatewayConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::Network(e.to_string()))?;

        Ok(Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Serialize the request body
    ///
    /// Messages are `[system?, user]`: the system message only appears when
    /// the options carry one.
    pub(crate) fn build_request_body(&self, request: &GenerationRequest) -> Result<String, AiError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.options.system_message.as_deref() {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        let body = ChatRequest {
            model: &self.model,
            messages,
            max_tokens: request.options.max_tokens,
            temperature: request.options.temperature,
        };

        serde_json::to_string(&body).map_err(|e| AiError::Parse(e.to_string()))
    }
}

/// Extract the first choice's text from a response body, trimmed
pub(crate) fn parse_response_body(body: &str) -> Result<String, AiError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| AiError::Parse(e.to_string()))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AiError::Parse("response contained no choices".to_string()))?;

    let content = choice
        .message
        .content
        .ok_or_else(|| AiError::Parse("first choice has no message content".to_string()))?;

    Ok(content.trim().to_string())
}

impl CompletionBackend for OpenAiClient {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, AiError> {
        let body = self.build_request_body(request)?;

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AiError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        parse_response_body(&text)
    }
}

#[cfg(test)]
#[path = "openai_tests.rs"]
mod openai_tests;
