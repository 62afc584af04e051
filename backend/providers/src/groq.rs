//! Groq chat-completion client (OpenAI-compatible API).

use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use cardlens_core::{CardError, LlmProvider, LlmRequest, LlmResponse};

/// Default model used for card classification.
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

const SYSTEM_PROMPT: &str = "\
Analyze the OCR text extracted from a business card and return the \
following items as JSON: name, phone, email, social_id (messenger \
handles such as KakaoTalk), position, company, address, fax. \
Respond with JSON only. Use null for any field the card does not show.";

/// Build the classification request for one card's OCR text.
pub fn classification_request(ocr_text: &str, model: &str) -> LlmRequest {
    LlmRequest {
        model: model.to_string(),
        system_prompt: SYSTEM_PROMPT.to_string(),
        user_prompt: format!(
            "The following text was extracted from a business card by OCR. \
             Classify it into structured fields:\n\n{ocr_text}"
        ),
        max_tokens: 1024,
        temperature: 0.3,
    }
}

/// Build a request that analyzes `text` under a caller-supplied system
/// prompt instead of the card-classification instruction.
pub fn custom_request(text: &str, custom_prompt: &str, model: &str) -> LlmRequest {
    LlmRequest {
        model: model.to_string(),
        system_prompt: custom_prompt.to_string(),
        user_prompt: text.to_string(),
        max_tokens: 1024,
        temperature: 0.3,
    }
}

/// Groq LLM provider.
pub struct GroqProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GroqProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct Usage {
    total_tokens: Option<u64>,
}

impl ChatResponse {
    /// Content of the first choice, empty when the response has none.
    fn first_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        let start = Instant::now();

        let mut messages = Vec::new();
        if !request.system_prompt.is_empty() {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: request.system_prompt.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: request.user_prompt.clone(),
        });

        let body = ChatRequest {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(model = %request.model, "Sending request to Groq");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| CardError::Transport {
                collaborator: "groq".to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(CardError::Transport {
                collaborator: "groq".to_string(),
                message: format!("{status}: {error_body}"),
            }
            .into());
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse Groq response")?;

        let tokens_used = chat_response
            .usage
            .as_ref()
            .and_then(|u| u.total_tokens)
            .unwrap_or(0);

        Ok(LlmResponse {
            content: chat_response.first_content(),
            provider: "groq".to_string(),
            model: request.model.clone(),
            tokens_used,
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}
