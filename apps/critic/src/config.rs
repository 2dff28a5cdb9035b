use std::time::Duration;

use anyhow::{Context, Result};

use crate::critique::OutOfRangePolicy;
use crate::llm_client::{LlmSettings, DEFAULT_API_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is malformed. The API key is only
/// required once an LLM client is built.
#[derive(Debug, Clone)]
pub struct Config {
    pub deepseek_api_key: Option<String>,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub score_policy: OutOfRangePolicy,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            deepseek_api_key: lookup("DEEPSEEK_API_KEY").filter(|key| !key.trim().is_empty()),
            llm_api_url: or_default("DEEPSEEK_API_URL", DEFAULT_API_URL),
            llm_model: or_default("DEEPSEEK_MODEL", DEFAULT_MODEL),
            llm_timeout_secs: or_default("LLM_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            score_policy: or_default("CRITIQUE_SCORE_POLICY", "passthrough")
                .parse::<OutOfRangePolicy>()
                .context("CRITIQUE_SCORE_POLICY is invalid")?,
            rust_log: or_default("RUST_LOG", "info"),
        })
    }

    pub fn llm_settings(&self) -> Result<LlmSettings> {
        let api_key = self
            .deepseek_api_key
            .clone()
            .context("Required environment variable 'DEEPSEEK_API_KEY' is not set")?;

        Ok(LlmSettings {
            api_key,
            api_url: self.llm_api_url.clone(),
            model: self.llm_model.clone(),
            timeout: Duration::from_secs(self.llm_timeout_secs),
        })
    }
}
