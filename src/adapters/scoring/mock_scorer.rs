//! Mock risk scorer for tests and offline runs.

use crate::domain::{DomainError, FeatureRecord, Rate, RiskRecord};
use crate::ports::RiskScoringPort;
use tokio::sync::Mutex;
use tracing::info;

/// Answers every call with the same scripted outcome and records the features it saw.
pub struct MockRiskScorer {
    outcome: Result<RiskRecord, DomainError>,
    seen: Mutex<Vec<FeatureRecord>>,
}

impl MockRiskScorer {
    pub fn returning(outcome: Result<RiskRecord, DomainError>) -> Self {
        Self {
            outcome,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// A moderate, fixed prediction.
    pub fn new() -> Self {
        Self::returning(Ok(RiskRecord {
            failure_rate: Rate::Text("55.0%".to_string()),
            success_rate: Rate::Text("45.0%".to_string()),
            risk_factors: vec![
                "[MOCK] High competition in tech startups, requiring strong differentiation."
                    .to_string(),
                "[MOCK] Early-stage funding is unstable and might not last long.".to_string(),
            ],
        }))
    }

    /// Feature records received so far.
    pub async fn seen(&self) -> Vec<FeatureRecord> {
        self.seen.lock().await.clone()
    }
}

impl Default for MockRiskScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RiskScoringPort for MockRiskScorer {
    async fn score(&self, features: &FeatureRecord) -> Result<RiskRecord, DomainError> {
        info!(industry = %features.industry, "[MOCK] Simulating risk scoring");
        self.seen.lock().await.push(features.clone());
        self.outcome.clone()
    }
}
