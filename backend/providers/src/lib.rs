pub mod groq;
pub mod mock;
pub mod vision;

pub use groq::{classification_request, custom_request, GroqProvider};
pub use mock::{MockLlm, MockOcr};
pub use vision::VisionOcr;
