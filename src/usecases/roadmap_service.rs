//! Roadmap and task guidance pipelines.
//!
//! The roadmap never fails outward: a bad or missing reply yields a default single-phase plan.
//! Task guidance reports failures as `{success: false, message, error}`.

use crate::domain::entities::require;
use crate::domain::extract::{Shape, extract_as, strip_code_fences};
use crate::domain::prompts::{roadmap_prompt, task_guidance_prompt};
use crate::domain::{
    DomainError, Failure, Phase, Profile, RoadmapPlan, RoadmapResponse, Task, TaskGuidance,
    TaskGuidanceResponse,
};
use crate::ports::GenerationPort;
use crate::usecases::FailurePolicy;
use std::sync::Arc;
use tracing::info;

const DEFAULT_VALIDATION_TASKS: &[(&str, &str)] = &[
    (
        "Conduct market research & customer interviews",
        "Talk to at least 20 potential customers to confirm the problem is real and urgent.",
    ),
    (
        "Build MVP (Minimum Viable Product)",
        "Ship the smallest version of the product that tests the core value proposition.",
    ),
    (
        "Launch beta testing with 10-20 early users",
        "Recruit early adopters and observe how they use the product.",
    ),
    (
        "Refine product based on feedback",
        "Prioritise fixes and features by how often users ask for them.",
    ),
    (
        "Define core metrics to track success",
        "Pick the handful of numbers that show whether the startup is working.",
    ),
];

/// Single-phase plan returned when the model's roadmap cannot be used.
pub fn default_roadmap() -> RoadmapPlan {
    RoadmapPlan {
        phases: vec![Phase {
            name: "Validation Phase".to_string(),
            duration: "3 months".to_string(),
            percent_complete: 0,
            tasks: DEFAULT_VALIDATION_TASKS
                .iter()
                .map(|(title, description)| Task {
                    title: title.to_string(),
                    description: description.to_string(),
                    status: "Not Started".to_string(),
                })
                .collect(),
        }],
        startup_profile: None,
    }
}

pub struct RoadmapService {
    ai: Arc<dyn GenerationPort>,
}

impl RoadmapService {
    const ROADMAP_POLICY: FailurePolicy<RoadmapPlan> = FailurePolicy::Fallback(default_roadmap);
    const GUIDANCE_POLICY: FailurePolicy<TaskGuidance> = FailurePolicy::Propagate;

    pub fn new(ai: Arc<dyn GenerationPort>) -> Self {
        Self { ai }
    }

    /// Generate a phased roadmap for `profile`.
    pub async fn generate_roadmap(&self, profile: &Profile) -> RoadmapResponse {
        info!(industry = %profile.industry, region = %profile.region, "generating roadmap");

        let result = self.request_roadmap(profile).await;
        let roadmap = Self::ROADMAP_POLICY.resolve("roadmap", result, default_roadmap);

        info!(phases = roadmap.phases.len(), "roadmap ready");
        RoadmapResponse {
            success: true,
            roadmap,
        }
    }

    async fn request_roadmap(&self, profile: &Profile) -> Result<RoadmapPlan, DomainError> {
        let raw = self.ai.generate(&roadmap_prompt(profile)).await?;
        extract_as(strip_code_fences(&raw), Shape::Object)
    }

    /// Step-by-step guidance for one roadmap task.
    pub async fn generate_task_guidance(
        &self,
        task_title: &str,
        profile: &Profile,
    ) -> TaskGuidanceResponse {
        if let Err(e) = require("taskTitle", task_title) {
            return TaskGuidanceResponse::Failure(Failure::with_error(
                "Task title is required",
                e,
            ));
        }

        info!(task_title, "generating task guidance");

        let result = self.request_guidance(task_title, profile).await;
        match Self::GUIDANCE_POLICY.apply("task_guidance", result) {
            Ok(mut data) => {
                if data.task_title.trim().is_empty() {
                    data.task_title = task_title.to_string();
                }
                TaskGuidanceResponse::Success {
                    success: true,
                    data,
                }
            }
            Err(e) if e.is_transport() => TaskGuidanceResponse::Failure(Failure::with_error(
                "Failed to generate task guidance",
                e,
            )),
            Err(e) => {
                TaskGuidanceResponse::Failure(Failure::with_error("Invalid AI response", e))
            }
        }
    }

    async fn request_guidance(
        &self,
        task_title: &str,
        profile: &Profile,
    ) -> Result<TaskGuidance, DomainError> {
        let raw = self
            .ai
            .generate(&task_guidance_prompt(task_title, profile))
            .await?;
        extract_as(strip_code_fences(&raw), Shape::Object)
    }
}
