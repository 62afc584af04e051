//! Persistence of final results and intermediate OCR artifacts as
//! indented JSON documents.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use cardlens_core::{CardError, FinalResult, OcrResult};

pub const RESULT_FILENAME: &str = "card_classified_data.json";
pub const OCR_TEXT_FILENAME: &str = "ocr_result.txt";
pub const OCR_JSON_FILENAME: &str = "ocr_result.json";

/// Writes pipeline artifacts into a single output directory.
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist the final record for one card.
    pub fn save_final_result(&self, result: &FinalResult) -> Result<PathBuf, CardError> {
        let path = self.write_json(RESULT_FILENAME, result)?;
        info!(path = %path.display(), "Saved classified card data");
        Ok(path)
    }

    /// Persist the OCR text and the provider's full raw response.
    pub fn save_ocr_result(&self, ocr: &OcrResult) -> Result<(), CardError> {
        let text_path = self.dir.join(OCR_TEXT_FILENAME);
        write_file(&text_path, ocr.text.as_bytes())?;
        self.write_json(OCR_JSON_FILENAME, &ocr.raw_response)?;
        info!(path = %text_path.display(), "Saved OCR intermediates");
        Ok(())
    }

    /// Persist a batch-processing summary.
    pub fn save_batch_summary<T: Serialize>(&self, summary: &T) -> Result<PathBuf, CardError> {
        self.write_json("batch_processing_result.json", summary)
    }

    fn write_json<T: Serialize>(&self, filename: &str, value: &T) -> Result<PathBuf, CardError> {
        let path = self.dir.join(filename);
        let body = serde_json::to_string_pretty(value).map_err(|e| CardError::FileWrite {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        write_file(&path, body.as_bytes())?;
        Ok(path)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), CardError> {
    fs::write(path, bytes).map_err(|e| CardError::FileWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
