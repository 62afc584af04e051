pub mod error;
pub mod traits;
pub mod types;

pub use error::CardError;
pub use traits::{LlmProvider, LlmRequest, LlmResponse, OcrProvider, OcrResult};
pub use types::{CandidateFieldMap, CanonicalField, CleanedRecord, FinalResult};
