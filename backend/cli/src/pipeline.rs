//! Pipeline orchestration: OCR -> LLM classification -> normalization
//! core -> storage, halting on the first failure with a named stage.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::anyhow;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use cardlens_core::{FinalResult, LlmProvider, OcrProvider};
use cardlens_providers::groq::classification_request;
use cardlens_understanding::{assemble, clean_card_data, extract_candidate_map};

use crate::storage::Storage;

/// The named pipeline stage a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ocr,
    Classification,
    JsonParsing,
    Storage,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Ocr => "OCR",
            Stage::Classification => "Classification",
            Stage::JsonParsing => "JSON Parsing",
            Stage::Storage => "Storage",
        })
    }
}

/// A pipeline failure, tagged with the stage it occurred in.
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: anyhow::Error,
}

impl PipelineError {
    fn new(stage: Stage, source: anyhow::Error) -> Self {
        Self { stage, source }
    }
}

/// Outcome of processing a single card.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub result: FinalResult,
    /// The OCR text, kept for reporting alongside the structured data.
    pub extracted_text: String,
}

/// One card's entry in a batch run.
#[derive(Debug, Serialize)]
pub struct BatchEntry {
    pub image_path: String,
    pub card_id: u64,
    pub success: bool,
    pub error: Option<String>,
    pub data: Option<FinalResult>,
}

/// Summary of a batch run over several card images.
#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub total_processed: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub results: Vec<BatchEntry>,
}

/// Drives one card image through the full pipeline.
///
/// Stateless between invocations: the providers are immutable and every
/// call owns its own data end to end.
pub struct Processor {
    ocr: Arc<dyn OcrProvider>,
    llm: Arc<dyn LlmProvider>,
    model: String,
    storage: Storage,
}

impl Processor {
    pub fn new(
        ocr: Arc<dyn OcrProvider>,
        llm: Arc<dyn LlmProvider>,
        model: impl Into<String>,
        storage: Storage,
    ) -> Self {
        Self {
            ocr,
            llm,
            model: model.into(),
            storage,
        }
    }

    /// Process one card image into a `FinalResult`.
    ///
    /// Halts on the first failing stage. `save_intermediate` gates both
    /// the OCR artifacts and the final result file.
    pub async fn process_card(
        &self,
        image_path: &Path,
        card_id: u64,
        save_intermediate: bool,
    ) -> Result<ProcessOutcome, PipelineError> {
        info!(image = %image_path.display(), card_id, "Processing business card");

        let image_bytes = tokio::fs::read(image_path)
            .await
            .map_err(|e| PipelineError::new(Stage::Ocr, anyhow!("reading {}: {e}", image_path.display())))?;

        let ocr = self
            .ocr
            .extract_text(&image_bytes, guess_mime(image_path))
            .await
            .map_err(|e| PipelineError::new(Stage::Ocr, e))?;
        info!(
            provider = self.ocr.name(),
            chars = ocr.text.chars().count(),
            "OCR complete"
        );

        if save_intermediate {
            // A failed intermediate write is reported but does not
            // invalidate the computed data.
            if let Err(e) = self.storage.save_ocr_result(&ocr) {
                warn!(error = %e, "Failed to save OCR intermediates");
            }
        }

        let request = classification_request(&ocr.text, &self.model);
        let response = self
            .llm
            .complete(&request)
            .await
            .map_err(|e| PipelineError::new(Stage::Classification, e))?;
        info!(
            provider = %response.provider,
            model = %response.model,
            tokens = response.tokens_used,
            latency_ms = response.latency_ms,
            "Classification complete"
        );

        let candidate = extract_candidate_map(&response.content)
            .map_err(|e| PipelineError::new(Stage::JsonParsing, e.into()))?;
        let cleaned = clean_card_data(&candidate);
        let result = assemble(cleaned, card_id, image_path.display().to_string(), None);

        if save_intermediate {
            self.storage
                .save_final_result(&result)
                .map_err(|e| PipelineError::new(Stage::Storage, e.into()))?;
        }

        Ok(ProcessOutcome {
            result,
            extracted_text: ocr.text,
        })
    }

    /// Process several card images with sequential card ids.
    ///
    /// A single card's failure never halts the batch; per-card outcomes
    /// are collected into the summary, which is persisted at the end.
    pub async fn process_many(&self, image_paths: &[PathBuf], start_card_id: u64) -> BatchSummary {
        let mut results = Vec::with_capacity(image_paths.len());
        let mut success_count = 0;

        for (i, image_path) in image_paths.iter().enumerate() {
            let card_id = start_card_id + i as u64;
            match self.process_card(image_path, card_id, false).await {
                Ok(outcome) => {
                    success_count += 1;
                    results.push(BatchEntry {
                        image_path: image_path.display().to_string(),
                        card_id,
                        success: true,
                        error: None,
                        data: Some(outcome.result),
                    });
                }
                Err(e) => {
                    warn!(image = %image_path.display(), stage = %e.stage, error = %e, "Card failed");
                    results.push(BatchEntry {
                        image_path: image_path.display().to_string(),
                        card_id,
                        success: false,
                        error: Some(e.to_string()),
                        data: None,
                    });
                }
            }
        }

        let summary = BatchSummary {
            total_processed: image_paths.len(),
            success_count,
            failure_count: image_paths.len() - success_count,
            results,
        };
        info!(
            total = summary.total_processed,
            ok = summary.success_count,
            failed = summary.failure_count,
            "Batch processing complete"
        );

        if let Err(e) = self.storage.save_batch_summary(&summary) {
            warn!(error = %e, "Failed to save batch summary");
        }

        summary
    }
}

fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
