use domain::error::RagError;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const API_KEY_PLACEHOLDER: &str = "YOUR_OPENROUTER_API_KEY";

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "deepseek/deepseek-r1:free";
const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Settings for one run, built once at startup and passed to the clients.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub completion_base_url: String,
    pub completion_model: String,
    pub ollama_base_url: String,
    pub embedding_model: String,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("completion_base_url", &self.completion_base_url)
            .field("completion_model", &self.completion_model)
            .field("ollama_base_url", &self.ollama_base_url)
            .field("embedding_model", &self.embedding_model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    /// Reads `.env` (if present) and then the process environment.
    pub fn load() -> Result<Self, RagError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, RagError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENROUTER_API_KEY")
            .map(|key| key.trim().to_string())
            .unwrap_or_default();
        if api_key.is_empty() || api_key == API_KEY_PLACEHOLDER {
            return Err(RagError::Configuration(
                "Please set your OpenRouter API key (OPENROUTER_API_KEY) in the environment or .env."
                    .to_string(),
            ));
        }

        let timeout_secs = match lookup("RAGUARD_TIMEOUT_SECS").filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let with_default = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            api_key,
            completion_base_url: with_default("OPENROUTER_BASE_URL", DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            completion_model: with_default("RAGUARD_MODEL", DEFAULT_MODEL),
            ollama_base_url: with_default("OLLAMA_BASE_URL", DEFAULT_OLLAMA_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            embedding_model: with_default("RAGUARD_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_timeout(raw: &str) -> Result<u64, RagError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(RagError::Configuration(format!(
            "RAGUARD_TIMEOUT_SECS must be a positive number of seconds, got '{}'.",
            raw
        ))),
    }
}
