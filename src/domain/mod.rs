//! Core domain layer. No external I/O dependencies.
//!
//! Entities, prompt building and structured extraction live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod extract;
pub mod prompts;
pub mod responses;

pub use entities::{
    AnalysisPoint, ChecklistItem, ChecklistItemWithDetail, Competitor, ComplianceDetail,
    ConversationTurn, FeatureRecord, GrowthStrategy, GuidanceStep, Insight, Insights,
    MarketContext, Phase, Priority, Profile, Rate, Resource, RiskLevel, RiskRecord, RoadmapPlan,
    RoadmapProfile, Role, SwotAnalysis, SwotBundle, Task, TaskGuidance,
};
pub use errors::{DomainError, ErrorBody};
pub use responses::{
    Failure, MentorReply, PredictionResponse, ResetResponse, RoadmapResponse, SuggestedQuestions,
    TaskGuidanceResponse,
};
