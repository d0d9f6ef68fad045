//! Curated market data for SWOT enrichment. Implements MarketDataPort.
//!
//! Fixed figures stand in for market research, regional and funding sources.

use crate::domain::DomainError;
use crate::ports::MarketDataPort;
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct StaticMarketData;

impl StaticMarketData {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MarketDataPort for StaticMarketData {
    async fn industry_stats(&self, industry: &str) -> Result<Value, DomainError> {
        debug!(industry, "industry stats lookup (static)");
        Ok(json!({
            "growthRate": "14.5%",
            "averageFundingRound": "$2.1M",
            "keyPlayers": ["Company A", "Company B", "Company C"],
            "trendsToWatch": ["AI integration", "Subscription models", "Remote-first operations"],
            "challenges": ["Talent acquisition", "Regulatory changes", "Market saturation"]
        }))
    }

    async fn regional_data(&self, country: &str, region: &str) -> Result<Value, DomainError> {
        debug!(country, region, "regional data lookup (static)");
        Ok(json!({
            "techHubs": ["Chennai", "Coimbatore", "Madurai"],
            "governmentInitiatives": ["Startup TN", "TANSTIA"],
            "fundingAvailability": "Medium",
            "talentPool": "Large technical talent pool, especially in IT/software",
            "costOfOperation": "30% lower than Bangalore",
            "regulatoryEnvironment": "Favorable with recent startup-friendly policies"
        }))
    }

    async fn funding_trends(
        &self,
        industry: &str,
        stage: Option<&str>,
    ) -> Result<Value, DomainError> {
        debug!(industry, stage = ?stage, "funding trends lookup (static)");
        Ok(json!({
            "averagePreSeed": "$150K-$300K",
            "averageSeed": "$1M-$2M",
            "averageSeriesA": "$5M-$10M",
            "activeInvestors": ["Investor A", "Investor B", "Investor C"],
            "valuationMultiples": "5-7x ARR",
            "burnRateAverage": "$50K-$100K/month"
        }))
    }
}
