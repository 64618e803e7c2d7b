use crate::error::{AppError, Result};
use dotenvy::dotenv;
use std::env;

/// Model used when `OPENAI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// API base used when `OPENAI_API_BASE` is not set.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
}

impl Config {
    /// Loads configuration from the environment, reading a local `.env`
    /// file first if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingEnvVar`] when `OPENAI_API_KEY` is unset.
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();

        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| AppError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let api_base =
            env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        Ok(Self {
            api_key,
            model,
            api_base,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_vision_capable_endpoint() {
        let config = Config {
            api_key: "test-key".to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        };
        assert!(config.api_base.starts_with("https://"));
        assert!(!config.model.is_empty());
    }
}
