use cardlens_providers::groq;

/// CardLens runtime configuration.
///
/// Credentials live here and are passed into provider constructors at
/// startup; nothing reads the environment after this point.
#[derive(Debug, Clone)]
pub struct Config {
    /// Groq API key
    pub groq_api_key: Option<String>,
    /// Google Vision API key
    pub vision_api_key: Option<String>,
    /// Model used for classification
    pub model: String,
    /// Directory result and intermediate files are written to
    pub output_dir: String,
    /// Log level
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            vision_api_key: None,
            model: groq::DEFAULT_MODEL.to_string(),
            output_dir: ".".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self {
            groq_api_key: std::env::var("GROQ_API_KEY").ok(),
            vision_api_key: std::env::var("GOOGLE_VISION_API_KEY").ok(),
            model: std::env::var("CARDLENS_MODEL")
                .unwrap_or_else(|_| groq::DEFAULT_MODEL.to_string()),
            output_dir: std::env::var("CARDLENS_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}
