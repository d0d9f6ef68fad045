//! Response shapes returned to the caller. Every pipeline answers with one of these.

use serde::Serialize;

use super::entities::{GrowthStrategy, RiskRecord, RoadmapPlan, TaskGuidance};

/// `{success: false, message, error?}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Failure {
    pub fn with_error(message: impl Into<String>, error: impl ToString) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: Some(error.to_string()),
        }
    }
}

/// The roadmap pipeline never fails outward; a default plan replaces a bad reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapResponse {
    pub success: bool,
    pub roadmap: RoadmapPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TaskGuidanceResponse {
    Success { success: bool, data: TaskGuidance },
    Failure(Failure),
}

impl TaskGuidanceResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskGuidanceResponse::Success { .. })
    }
}

/// Failure prediction outcome. `prediction` survives a failed growth-strategy step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<RiskRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_strategy: Option<GrowthStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorReply {
    pub message: String,
    pub follow_up_questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestedQuestions {
    pub questions: Vec<String>,
}
