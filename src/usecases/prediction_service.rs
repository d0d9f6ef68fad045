//! Failure prediction: risk scoring first, then a growth strategy generated around it.
//!
//! Scoring is mandatory. If it fails no generation call is made. A bad growth-strategy reply
//! still returns the prediction.

use crate::domain::entities::require;
use crate::domain::extract::{Shape, extract_as};
use crate::domain::prompts::growth_strategy_prompt;
use crate::domain::{DomainError, FeatureRecord, GrowthStrategy, PredictionResponse, Profile};
use crate::ports::{GenerationPort, RiskScoringPort};
use std::sync::Arc;
use tracing::{info, warn};

const INDUSTRY_LABELS: &[(&str, &str)] = &[
    ("tech", "Technology & SaaS"),
    ("health", "Healthcare & Biotech"),
    ("finance", "Fintech & Finance"),
    ("ecommerce", "E-commerce & Retail"),
    ("education", "Education & EdTech"),
    ("food", "Food & Beverage"),
    ("transportation", "Transportation & Logistics"),
    ("real_estate", "Real Estate & PropTech"),
    ("media", "Media & Entertainment"),
    ("energy", "Energy & CleanTech"),
    ("manufacturing", "Manufacturing"),
    ("other", "Other"),
];

/// Industry label the scoring model was trained on. Form values map to their label, labels
/// pass through, anything else is `Other`.
fn industry_label(industry: &str) -> &'static str {
    let key = industry.trim();
    INDUSTRY_LABELS
        .iter()
        .find(|(value, label)| value.eq_ignore_ascii_case(key) || label.eq_ignore_ascii_case(key))
        .map(|(_, label)| *label)
        .unwrap_or("Other")
}

fn form_value(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Feature record for the risk-scoring model.
pub fn normalize_features(profile: &Profile) -> FeatureRecord {
    FeatureRecord {
        industry: industry_label(&profile.industry).to_string(),
        budget: form_value(&profile.budget_range),
        team_size: form_value(&profile.team_size),
        market_size: form_value(&profile.target_market_size),
        country: form_value(&profile.country),
    }
}

pub struct PredictionService {
    scorer: Arc<dyn RiskScoringPort>,
    ai: Arc<dyn GenerationPort>,
}

impl PredictionService {
    pub fn new(scorer: Arc<dyn RiskScoringPort>, ai: Arc<dyn GenerationPort>) -> Self {
        Self { scorer, ai }
    }

    /// Risk prediction and growth strategy for `profile`.
    ///
    /// Scoring and generation failures are reported inside the response.
    ///
    /// # Errors
    /// `MissingRequiredField` when the profile has no industry.
    pub async fn predict(&self, profile: &Profile) -> Result<PredictionResponse, DomainError> {
        require("industry", &profile.industry)?;

        let features = normalize_features(profile);
        info!(industry = %features.industry, country = %features.country, "scoring startup risk");

        let prediction = match self.scorer.score(&features).await {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, transport = e.is_transport(), "risk scoring failed");
                return Ok(PredictionResponse {
                    success: false,
                    message: "Invalid response from prediction model".to_string(),
                    prediction: None,
                    growth_strategy: None,
                    error: Some(e.to_string()),
                });
            }
        };
        info!(
            failure_rate = %prediction.failure_rate,
            risk_factors = prediction.risk_factors.len(),
            "risk scored"
        );

        let raw = match self
            .ai
            .generate(&growth_strategy_prompt(profile, &prediction))
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "growth strategy generation failed");
                return Ok(PredictionResponse {
                    success: false,
                    message: "Failed to generate growth strategy".to_string(),
                    prediction: Some(prediction),
                    growth_strategy: None,
                    error: Some(e.to_string()),
                });
            }
        };

        match extract_as::<GrowthStrategy>(&raw, Shape::Object) {
            Ok(strategy) => Ok(PredictionResponse {
                success: true,
                message: "Failure prediction data generated successfully".to_string(),
                prediction: Some(prediction),
                growth_strategy: Some(strategy),
                error: None,
            }),
            Err(e) => {
                warn!(error = %e, "growth strategy extraction failed");
                Ok(PredictionResponse {
                    success: false,
                    message: "Invalid AI response".to_string(),
                    prediction: Some(prediction),
                    growth_strategy: None,
                    error: Some(e.to_string()),
                })
            }
        }
    }
}
