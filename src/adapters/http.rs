//! Shared HTTP client construction for the collaborator adapters.

use crate::domain::DomainError;
use std::time::Duration;

/// Build a reqwest client whose every request is bounded by `timeout`.
pub fn client_with_timeout(timeout: Duration) -> Result<reqwest::Client, DomainError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DomainError::Config(format!("HTTP client: {}", e)))
}

/// Human-readable reason for a failed request; timeouts are called out explicitly.
pub fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("request timed out: {}", e)
    } else {
        format!("HTTP request failed: {}", e)
    }
}

/// Truncate an error body for logs and error messages.
pub fn snippet(text: &str) -> String {
    text.chars().take(200).collect()
}
