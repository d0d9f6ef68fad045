//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Caller input is incomplete. Reported before any external call is made.
    #[error("{0} is required")]
    MissingRequiredField(String),

    /// Generative capability unreachable, erroring or timed out.
    #[error("Generation unavailable: {0}")]
    GenerationUnavailable(String),

    /// Risk-scoring capability unreachable, erroring or timed out.
    #[error("Scoring unavailable: {0}")]
    ScoringUnavailable(String),

    /// No JSON-shaped span in the model text.
    #[error("Failed to extract JSON from model response: {0}")]
    ExtractionFailed(String),

    /// A span was found but it is not valid JSON (or not the expected shape).
    #[error("Malformed JSON payload: {0}")]
    MalformedPayload(String),

    #[error("Incomplete compliance data: {0}")]
    IncompleteComplianceData(String),

    /// Scoring replied but the record lacks `risk_factors`.
    #[error("Invalid scoring result: {0}")]
    InvalidScoringResult(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl DomainError {
    /// True for failures to reach either external capability.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DomainError::GenerationUnavailable(_) | DomainError::ScoringUnavailable(_)
        )
    }

    /// True when the caller is at fault (the HTTP 400 equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::MissingRequiredField(_))
    }

    /// True when the capability replied but the reply did not have the expected shape.
    pub fn is_shape_failure(&self) -> bool {
        matches!(
            self,
            DomainError::ExtractionFailed(_)
                | DomainError::MalformedPayload(_)
                | DomainError::IncompleteComplianceData(_)
                | DomainError::InvalidScoringResult(_)
        )
    }
}

/// Serializable error shape for propagated failures: `{"error": ..., "details": ...}`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&DomainError> for ErrorBody {
    fn from(err: &DomainError) -> Self {
        if err.is_client_error() {
            return Self {
                error: err.to_string(),
                details: None,
            };
        }
        Self {
            error: "An error occurred while processing the request".to_string(),
            details: Some(err.to_string()),
        }
    }
}
