//! Application configuration. Provider credentials, endpoints, timeouts.

use serde::{Deserialize, Deserializer};
use std::str::FromStr;

use crate::adapters::persistence::DEFAULT_HISTORY_WINDOW;

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SCORING_URL: &str = "http://127.0.0.1:5000/predict";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Which generative backend to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    Gemini,
    OpenAi,
    /// No API key: scripted placeholder replies.
    Mock,
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// `gemini` (default) or `openai`. Read from COPILOT_AI_PROVIDER.
    #[serde(default)]
    pub ai_provider: Option<String>,

    /// Read from COPILOT_AI_API_KEY, falling back to GEMINI_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// Read from COPILOT_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// Base URL (Gemini) or chat completions URL (OpenAI). Read from COPILOT_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// Risk-scoring endpoint. Read from COPILOT_SCORING_URL, falling back to PYTHON_SERVER_URL.
    #[serde(default)]
    pub scoring_url: Option<String>,

    /// Timeout applied to every outbound call. Read from COPILOT_REQUEST_TIMEOUT_SECS.
    #[serde(default, deserialize_with = "lenient_number")]
    pub request_timeout_secs: Option<u64>,

    /// Turns kept per mentor session. Read from COPILOT_HISTORY_WINDOW.
    #[serde(default, deserialize_with = "lenient_number")]
    pub history_window: Option<usize>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("COPILOT"));
        if let Ok(path) = std::env::var("COPILOT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the AI API key from config, COPILOT_AI_API_KEY or GEMINI_API_KEY.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .or_else(|| std::env::var("COPILOT_AI_API_KEY").ok())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Provider to use. Mock whenever no key is configured.
    pub fn ai_provider(&self) -> AiProvider {
        if self.ai_api_key().is_none() {
            return AiProvider::Mock;
        }
        match self.ai_provider.as_deref().map(str::trim) {
            Some(p) if p.eq_ignore_ascii_case("openai") => AiProvider::OpenAi,
            _ => AiProvider::Gemini,
        }
    }

    /// Returns the AI model name. Defaults per provider.
    pub fn ai_model_or_default(&self) -> String {
        self.ai_model.clone().unwrap_or_else(|| match self.ai_provider() {
            AiProvider::OpenAi => DEFAULT_OPENAI_MODEL.to_string(),
            _ => DEFAULT_GEMINI_MODEL.to_string(),
        })
    }

    /// Returns the AI API URL. Defaults per provider.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url.clone().unwrap_or_else(|| match self.ai_provider() {
            AiProvider::OpenAi => DEFAULT_OPENAI_URL.to_string(),
            _ => DEFAULT_GEMINI_URL.to_string(),
        })
    }

    pub fn scoring_url_or_default(&self) -> String {
        self.scoring_url
            .clone()
            .or_else(|| std::env::var("PYTHON_SERVER_URL").ok())
            .unwrap_or_else(|| DEFAULT_SCORING_URL.to_string())
    }

    /// Returns the outbound call timeout in seconds. Defaults to 30.
    pub fn request_timeout_secs_or_default(&self) -> u64 {
        self.request_timeout_secs
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    /// Returns the mentor history window. Defaults to 10.
    pub fn history_window_or_default(&self) -> usize {
        self.history_window.unwrap_or(DEFAULT_HISTORY_WINDOW)
    }
}

/// Numeric setting given as a number or a numeric string. Malformed values read as unset.
fn lenient_number<'de, D, N>(deserializer: D) -> Result<Option<N>, D::Error>
where
    D: Deserializer<'de>,
    N: TryFrom<u64> + FromStr,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => N::try_from(n).ok(),
        Raw::Text(s) => s.trim().parse().ok(),
        Raw::Other(_) => None,
    })
}
