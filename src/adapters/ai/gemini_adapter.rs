//! Google Gemini generation adapter (`models/{model}:generateContent`).

use crate::adapters::http::{client_with_timeout, describe, snippet};
use crate::domain::DomainError;
use crate::ports::GenerationPort;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct GeminiAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiAdapter {
    /// # Arguments
    /// * `base_url` - API root, e.g. "https://generativelanguage.googleapis.com/v1beta"
    /// * `api_key` - Gemini API key
    /// * `model` - Model name, e.g. "gemini-2.0-flash"
    /// * `timeout` - Upper bound for each request
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            client: client_with_timeout(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text parts of the first candidate, concatenated.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[async_trait::async_trait]
impl GenerationPort for GeminiAdapter {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        info!(
            model = %self.model,
            prompt_len = prompt.len(),
            "sending prompt to Gemini"
        );

        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::GenerationUnavailable(describe(&e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %snippet(&text), "Gemini API returned error");
            return Err(DomainError::GenerationUnavailable(format!(
                "API error {}: {}",
                status,
                snippet(&text)
            )));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            DomainError::GenerationUnavailable(format!("Failed to parse API response: {}", e))
        })?;

        let text = parsed.into_text().ok_or_else(|| {
            DomainError::GenerationUnavailable("No candidates returned".to_string())
        })?;

        debug!(raw_len = text.len(), "received Gemini response");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let adapter = GeminiAdapter::new(
            "https://generativelanguage.googleapis.com/v1beta/".into(),
            "key".into(),
            "gemini-2.0-flash".into(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            adapter.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Hello "},{"text":"world"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.into_text().as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_response_without_candidates() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(parsed.into_text().is_none());
        let parsed: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(parsed.into_text().is_none());
    }
}
