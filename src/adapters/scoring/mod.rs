//! Risk-scoring adapters. Implement RiskScoringPort.

pub mod http_scorer;
pub mod mock_scorer;

pub use http_scorer::HttpRiskScorer;
pub use mock_scorer::MockRiskScorer;
