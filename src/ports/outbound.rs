//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{ConversationTurn, DomainError, FeatureRecord, RiskRecord};
use serde_json::Value;

/// Generative text capability. Single-shot, no streaming.
#[async_trait::async_trait]
pub trait GenerationPort: Send + Sync {
    /// Submit `prompt` and return the model's raw text.
    ///
    /// # Errors
    /// `GenerationUnavailable` when the upstream call errors or times out. No retries.
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;
}

/// Numeric risk-scoring capability.
#[async_trait::async_trait]
pub trait RiskScoringPort: Send + Sync {
    /// Score a normalized feature record.
    ///
    /// # Errors
    /// - `ScoringUnavailable` on transport error, timeout or non-success status.
    /// - `InvalidScoringResult` when the reply lacks `risk_factors`.
    async fn score(&self, features: &FeatureRecord) -> Result<RiskRecord, DomainError>;
}

/// Market data lookups used to enrich SWOT prompts. Each lookup may fail independently.
#[async_trait::async_trait]
pub trait MarketDataPort: Send + Sync {
    async fn industry_stats(&self, industry: &str) -> Result<Value, DomainError>;

    async fn regional_data(&self, country: &str, region: &str) -> Result<Value, DomainError>;

    async fn funding_trends(
        &self,
        industry: &str,
        stage: Option<&str>,
    ) -> Result<Value, DomainError>;
}

/// Bounded per-session conversation history.
///
/// Appends to different sessions never block one another; each append is atomic per session.
#[async_trait::async_trait]
pub trait ConversationPort: Send + Sync {
    /// Append a turn, evicting the oldest turns beyond the window.
    async fn append(&self, session_id: &str, turn: ConversationTurn);

    /// Ordered turns of the session, oldest first. Empty for unknown sessions.
    async fn history(&self, session_id: &str) -> Vec<ConversationTurn>;

    /// Clear the session to empty.
    async fn reset(&self, session_id: &str);
}
