use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::gemini::{GenerationSettings, DEFAULT_BASE_URL};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout_secs: u64,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    /// Cap on daily cards generated per roadmap request.
    pub max_preview_days: usize,
    pub allowed_origins: Vec<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: env_or("GEMINI_MODEL", "gemini-1.5-flash"),
            gemini_base_url: env_or("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            gemini_timeout_secs: parse_env("GEMINI_TIMEOUT_SECS", 60)?,
            temperature: parse_env("GEMINI_TEMPERATURE", 0.7)?,
            top_p: parse_env("GEMINI_TOP_P", 0.95)?,
            top_k: parse_env("GEMINI_TOP_K", 40)?,
            max_output_tokens: parse_env("GEMINI_MAX_OUTPUT_TOKENS", 8192)?,
            max_preview_days: parse_env("MAX_PREVIEW_DAYS", 3)?,
            allowed_origins: split_origins(&env_or("ALLOWED_ORIGINS", "http://localhost:3000")),
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }

    /// Immutable backend configuration handed to the model gateway.
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            api_key: self.gemini_api_key.clone(),
            model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.clone(),
            timeout: Duration::from_secs(self.gemini_timeout_secs),
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
            max_output_tokens: self.max_output_tokens,
            safety_threshold: GenerationSettings::DEFAULT_SAFETY_THRESHOLD.to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_origins_trims_and_drops_empty() {
        let origins = split_origins(" http://a.test , ,https://b.test,");
        assert_eq!(origins, vec!["http://a.test", "https://b.test"]);
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("GUIDE_API_TEST_UNSET_VARIABLE", 8080).unwrap();
        assert_eq!(value, 8080);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("GUIDE_API_TEST_BAD_PORT", "eighty");
        let result: Result<u16> = parse_env("GUIDE_API_TEST_BAD_PORT", 8080);
        assert!(result.is_err());
        std::env::remove_var("GUIDE_API_TEST_BAD_PORT");
    }
}
