use anyhow::Result;
use async_trait::async_trait;

/// Trait for OCR collaborators that turn an image payload into text.
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Provider name (e.g., "google-vision").
    fn name(&self) -> &str;

    /// Extract all discernible text from raw image bytes.
    async fn extract_text(&self, image_bytes: &[u8], mime_type: &str) -> Result<OcrResult>;
}

/// Result of an OCR call.
#[derive(Debug, Clone)]
pub struct OcrResult {
    /// The extracted text, in reading order.
    pub text: String,
    /// The provider's full raw response, kept for intermediate artifacts.
    pub raw_response: serde_json::Value,
}

/// Trait for LLM collaborators used by the classification stage.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name (e.g., "groq").
    fn name(&self) -> &str;

    /// Send a completion request and return the response text.
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse>;
}

/// Request to an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Response from an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub provider: String,
    pub model: String,
    pub tokens_used: u64,
    pub latency_ms: u64,
}
