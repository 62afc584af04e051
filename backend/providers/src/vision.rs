//! Google Cloud Vision OCR client.
//!
//! Calls the `images:annotate` REST endpoint with a
//! DOCUMENT_TEXT_DETECTION feature request and returns the dense text
//! annotation for the whole image.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::info;

use cardlens_core::{CardError, OcrProvider, OcrResult};

/// Google Vision OCR provider.
pub struct VisionOcr {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl VisionOcr {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: "https://vision.googleapis.com/v1".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl OcrProvider for VisionOcr {
    fn name(&self) -> &str {
        "google-vision"
    }

    async fn extract_text(&self, image_bytes: &[u8], _mime_type: &str) -> Result<OcrResult> {
        info!(bytes = image_bytes.len(), "Running OCR via Google Vision");

        let body = serde_json::json!({
            "requests": [{
                "image": { "content": STANDARD.encode(image_bytes) },
                "features": [{ "type": "DOCUMENT_TEXT_DETECTION" }]
            }]
        });

        let url = format!("{}/images:annotate?key={}", self.base_url, self.api_key);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CardError::Transport {
                collaborator: "google-vision".to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(CardError::Transport {
                collaborator: "google-vision".to_string(),
                message: format!("{status}: {error_body}"),
            }
            .into());
        }

        let json: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse Vision response")?;

        if let Some(message) = annotation_error(&json) {
            return Err(CardError::OcrFailed(message.to_string()).into());
        }

        match annotation_text(&json) {
            Some(text) => Ok(OcrResult {
                text: text.to_string(),
                raw_response: json,
            }),
            None => Err(CardError::OcrFailed("no text detected in image".to_string()).into()),
        }
    }
}

/// Dense text for the whole image: `fullTextAnnotation.text`, falling
/// back to the first plain text annotation.
fn annotation_text(json: &serde_json::Value) -> Option<&str> {
    let response = json["responses"].get(0)?;
    response["fullTextAnnotation"]["text"]
        .as_str()
        .or_else(|| response["textAnnotations"][0]["description"].as_str())
        .filter(|text| !text.is_empty())
}

fn annotation_error(json: &serde_json::Value) -> Option<&str> {
    json["responses"][0]["error"]["message"].as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dense_annotation_is_preferred() {
        let json = json!({
            "responses": [{
                "fullTextAnnotation": { "text": "Jane Doe\nAcme Corp" },
                "textAnnotations": [{ "description": "Jane" }]
            }]
        });
        assert_eq!(annotation_text(&json), Some("Jane Doe\nAcme Corp"));
    }

    #[test]
    fn falls_back_to_first_text_annotation() {
        let json = json!({
            "responses": [{
                "textAnnotations": [{ "description": "Jane Doe" }, { "description": "Jane" }]
            }]
        });
        assert_eq!(annotation_text(&json), Some("Jane Doe"));
    }

    #[test]
    fn empty_response_has_no_text() {
        assert_eq!(annotation_text(&json!({ "responses": [{}] })), None);
        assert_eq!(annotation_text(&json!({ "responses": [] })), None);
    }

    #[test]
    fn api_error_is_surfaced() {
        let json = json!({
            "responses": [{ "error": { "message": "invalid image" } }]
        });
        assert_eq!(annotation_error(&json), Some("invalid image"));
    }
}
