//! Application use cases. Each service composes prompt building, generation, extraction and
//! (for failure prediction) risk scoring into one artifact pipeline.

pub mod checklist_service;
pub mod mentor_service;
pub mod prediction_service;
pub mod roadmap_service;
pub mod swot_service;

pub use checklist_service::{ChecklistService, merge_checklist_item};
pub use mentor_service::MentorService;
pub use prediction_service::{PredictionService, normalize_features};
pub use roadmap_service::RoadmapService;
pub use swot_service::SwotService;

use crate::domain::DomainError;
use tracing::warn;

/// What a pipeline stage does when generation or extraction fails.
///
/// Set per pipeline: some callers depend on a stage degrading silently, others on seeing the
/// error. `Fallback` stages resolve to a value, `Propagate` stages hand the error on.
pub enum FailurePolicy<T> {
    /// Replace the failure with a static value.
    Fallback(fn() -> T),
    /// Return the failure to the caller.
    Propagate,
}

impl<T> FailurePolicy<T> {
    pub fn apply(&self, stage: &str, result: Result<T, DomainError>) -> Result<T, DomainError> {
        match self {
            FailurePolicy::Fallback(default) => Ok(recover(stage, result, *default)),
            FailurePolicy::Propagate => result.map_err(|e| {
                log_failure(stage, &e, "stage failed");
                e
            }),
        }
    }

    /// Value of a fallback stage. A `Propagate` policy has no value of its own, so `or` stands
    /// in for it; pipelines only call this on `Fallback` policies.
    pub fn resolve(&self, stage: &str, result: Result<T, DomainError>, or: fn() -> T) -> T {
        match self {
            FailurePolicy::Fallback(default) => recover(stage, result, *default),
            FailurePolicy::Propagate => recover(stage, result, or),
        }
    }
}

fn recover<T>(stage: &str, result: Result<T, DomainError>, default: fn() -> T) -> T {
    result.unwrap_or_else(|e| {
        log_failure(stage, &e, "stage failed; using fallback");
        default()
    })
}

fn log_failure(stage: &str, e: &DomainError, message: &str) {
    warn!(
        stage,
        error = %e,
        transport = e.is_transport(),
        shape = e.is_shape_failure(),
        "{}",
        message
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero() -> u32 {
        0
    }

    fn seven() -> u32 {
        7
    }

    #[test]
    fn test_policy_fallback_masks_errors() {
        let policy = FailurePolicy::Fallback(zero);
        let out = policy.apply("t", Err(DomainError::ExtractionFailed("x".into())));
        assert_eq!(out, Ok(0));
        assert_eq!(policy.apply("t", Ok(7)), Ok(7));
    }

    #[test]
    fn test_policy_propagate_keeps_errors() {
        let policy: FailurePolicy<u32> = FailurePolicy::Propagate;
        let err = DomainError::GenerationUnavailable("down".into());
        assert_eq!(policy.apply("t", Err(err.clone())), Err(err));
    }

    #[test]
    fn test_resolve_uses_policy_default() {
        let policy = FailurePolicy::Fallback(zero);
        let err = DomainError::GenerationUnavailable("down".into());
        assert_eq!(policy.resolve("t", Err(err.clone()), seven), 0);
        assert_eq!(policy.resolve("t", Ok(3), seven), 3);

        let policy: FailurePolicy<u32> = FailurePolicy::Propagate;
        assert_eq!(policy.resolve("t", Err(err), seven), 7);
    }
}
