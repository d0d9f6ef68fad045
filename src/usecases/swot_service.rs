//! SWOT analysis pipeline, chained into competitor identification.
//!
//! Flow: enrich profile (three lookups, each optional) -> SWOT prompt -> generate -> extract
//! (JSON span, then line sections) -> competitors (fail-soft to empty) -> stamp.

use crate::domain::extract::{Shape, Strategy, extract, extract_as};
use crate::domain::prompts::{competitor_prompt, swot_prompt};
use crate::domain::{Competitor, DomainError, MarketContext, Profile, SwotAnalysis, SwotBundle};
use crate::ports::{GenerationPort, MarketDataPort};
use crate::usecases::FailurePolicy;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// Extraction strategies for the SWOT narrative, tried in order.
const SWOT_STRATEGIES: [Strategy; 2] = [Strategy::Span(Shape::Object), Strategy::SwotSections];

pub struct SwotService {
    ai: Arc<dyn GenerationPort>,
    market: Arc<dyn MarketDataPort>,
}

impl SwotService {
    const COMPETITOR_POLICY: FailurePolicy<Vec<Competitor>> = FailurePolicy::Fallback(Vec::new);

    pub fn new(ai: Arc<dyn GenerationPort>, market: Arc<dyn MarketDataPort>) -> Self {
        Self { ai, market }
    }

    /// SWOT analysis plus competitors for `profile`.
    ///
    /// # Errors
    /// Only a failed SWOT generation call; enrichment, extraction and competitor failures
    /// degrade.
    pub async fn generate_swot(&self, profile: &Profile) -> Result<SwotBundle, DomainError> {
        info!(industry = %profile.industry, region = %profile.region, "generating SWOT analysis");

        let market = self.enrich(profile).await;
        let full_analysis = self.ai.generate(&swot_prompt(profile, &market)).await?;
        let swot = parse_analysis(&full_analysis);
        let competitors = self.identify_competitors(profile).await;

        info!(
            strengths = swot.strengths.len(),
            weaknesses = swot.weaknesses.len(),
            opportunities = swot.opportunities.len(),
            threats = swot.threats.len(),
            competitors = competitors.len(),
            "SWOT analysis complete"
        );

        Ok(SwotBundle {
            swot,
            competitors,
            full_analysis,
        })
    }

    /// Run the three market lookups concurrently; a failed lookup is left out.
    pub async fn enrich(&self, profile: &Profile) -> MarketContext {
        let (industry_stats, regional_data, funding_trends) = tokio::join!(
            self.market.industry_stats(&profile.industry),
            self.market.regional_data(&profile.country, &profile.region),
            self.market
                .funding_trends(&profile.industry, profile.stage.as_deref()),
        );

        MarketContext {
            industry_stats: lookup_or_omit("industry_stats", industry_stats),
            regional_data: lookup_or_omit("regional_data", regional_data),
            funding_trends: lookup_or_omit("funding_trends", funding_trends),
        }
    }

    /// Competitors for `profile`. Never fails; any failure yields an empty list.
    pub async fn identify_competitors(&self, profile: &Profile) -> Vec<Competitor> {
        let result = self.request_competitors(profile).await;
        let competitors = Self::COMPETITOR_POLICY.resolve("competitors", result, Vec::new);
        verify_competitors(competitors)
    }

    async fn request_competitors(
        &self,
        profile: &Profile,
    ) -> Result<Vec<Competitor>, DomainError> {
        let raw = self.ai.generate(&competitor_prompt(profile)).await?;
        extract_as(&raw, Shape::Array)
    }
}

fn lookup_or_omit(lookup: &str, result: Result<Value, DomainError>) -> Option<Value> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(lookup, error = %e, "market lookup failed; omitting");
            None
        }
    }
}

/// Structured SWOT from the model text: JSON first, then the line-oriented sections.
pub fn parse_analysis(text: &str) -> SwotAnalysis {
    for strategy in SWOT_STRATEGIES {
        let parsed = extract(text, strategy).and_then(|value| {
            serde_json::from_value::<SwotAnalysis>(value)
                .map_err(|e| DomainError::MalformedPayload(e.to_string()))
        });
        match parsed {
            Ok(swot) => return swot,
            Err(e) => warn!(?strategy, error = %e, "SWOT extraction strategy failed"),
        }
    }
    SwotAnalysis::default()
}

/// Verification stage. There is no company database behind it yet: every entry is marked
/// verified and stamped with the current time.
fn verify_competitors(competitors: Vec<Competitor>) -> Vec<Competitor> {
    let now = Utc::now();
    competitors
        .into_iter()
        .map(|c| Competitor {
            verified: true,
            last_updated: Some(now),
            ..c
        })
        .collect()
}
