//! Mock collaborators returning canned responses, for pipeline tests.

use anyhow::{bail, Result};
use async_trait::async_trait;

use cardlens_core::{LlmProvider, LlmRequest, LlmResponse, OcrProvider, OcrResult};

/// A mock OCR provider that returns a fixed text.
pub struct MockOcr {
    text: String,
    fail_with: Option<String>,
}

impl MockOcr {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fail_with: None,
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            fail_with: Some(message.into()),
        }
    }
}

#[async_trait]
impl OcrProvider for MockOcr {
    fn name(&self) -> &str {
        "mock-ocr"
    }

    async fn extract_text(&self, _image_bytes: &[u8], _mime_type: &str) -> Result<OcrResult> {
        if let Some(message) = &self.fail_with {
            bail!("{message}");
        }
        Ok(OcrResult {
            text: self.text.clone(),
            raw_response: serde_json::json!({ "mock": true }),
        })
    }
}

/// A mock LLM provider that returns a fixed response.
pub struct MockLlm {
    content: String,
    fail_with: Option<String>,
}

impl MockLlm {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            fail_with: None,
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            fail_with: Some(message.into()),
        }
    }
}

#[async_trait]
impl LlmProvider for MockLlm {
    fn name(&self) -> &str {
        "mock-llm"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        if let Some(message) = &self.fail_with {
            bail!("{message}");
        }
        Ok(LlmResponse {
            content: self.content.clone(),
            provider: "mock-llm".to_string(),
            model: request.model.clone(),
            tokens_used: 0,
            latency_ms: 0,
        })
    }
}
