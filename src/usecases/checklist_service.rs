//! Legal checklist and compliance detail pipelines.
//!
//! Both require `country` and `region` and make no generation call without them. Unlike the
//! roadmap, extraction failures are returned to the caller; nothing is cached.

use crate::domain::entities::require;
use crate::domain::extract::{Shape, extract_as, extract_json};
use crate::domain::prompts::{checklist_prompt, compliance_detail_prompt};
use crate::domain::{ChecklistItem, ChecklistItemWithDetail, ComplianceDetail, DomainError, Profile};
use crate::ports::GenerationPort;
use crate::usecases::FailurePolicy;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

pub struct ChecklistService {
    ai: Arc<dyn GenerationPort>,
}

impl ChecklistService {
    const CHECKLIST_POLICY: FailurePolicy<Vec<ChecklistItem>> = FailurePolicy::Propagate;
    const DETAIL_POLICY: FailurePolicy<ComplianceDetail> = FailurePolicy::Propagate;

    pub fn new(ai: Arc<dyn GenerationPort>) -> Self {
        Self { ai }
    }

    /// Checklist of legal/compliance items for the profile's location.
    ///
    /// # Errors
    /// `MissingRequiredField` without country/region, otherwise generation or extraction errors.
    pub async fn list_checklist(
        &self,
        profile: &Profile,
    ) -> Result<Vec<ChecklistItem>, DomainError> {
        profile.require_location()?;
        info!(country = %profile.country, region = %profile.region, "generating legal checklist");

        let result = self.request_checklist(profile).await;
        let mut items = Self::CHECKLIST_POLICY.apply("checklist", result)?;
        for item in &mut items {
            item.completed = false;
        }

        info!(items = items.len(), "legal checklist ready");
        Ok(items)
    }

    async fn request_checklist(
        &self,
        profile: &Profile,
    ) -> Result<Vec<ChecklistItem>, DomainError> {
        let raw = self.ai.generate(&checklist_prompt(profile)).await?;
        extract_as(&raw, Shape::Array)
    }

    /// Location-specific compliance detail for one checklist item. The returned detail's
    /// title is the item id.
    ///
    /// # Errors
    /// `MissingRequiredField`, generation/extraction errors, or `IncompleteComplianceData` when
    /// the reply lacks the detail for the profile's country and region.
    pub async fn checklist_item_detail(
        &self,
        item_id: &str,
        profile: &Profile,
    ) -> Result<ComplianceDetail, DomainError> {
        profile.require_location()?;
        require("itemId", item_id)?;
        info!(item_id, country = %profile.country, region = %profile.region, "generating compliance detail");

        let result = self.request_detail(item_id, profile).await;
        let mut detail = Self::DETAIL_POLICY.apply("checklist_detail", result)?;
        detail.title = item_id.to_string();
        Ok(detail)
    }

    async fn request_detail(
        &self,
        item_id: &str,
        profile: &Profile,
    ) -> Result<ComplianceDetail, DomainError> {
        let raw = self
            .ai
            .generate(&compliance_detail_prompt(item_id, profile))
            .await?;
        let value = extract_json(&raw, Shape::Object)?;
        location_detail(&value, &profile.country, &profile.region)
    }
}

/// Pull `locationContent[country][region]` out of the reply and check every field is there.
fn location_detail(
    value: &Value,
    country: &str,
    region: &str,
) -> Result<ComplianceDetail, DomainError> {
    let nested = value
        .get("locationContent")
        .and_then(|v| v.get(country))
        .and_then(|v| v.get(region))
        .ok_or_else(|| {
            DomainError::IncompleteComplianceData(format!(
                "No data available for {}, {}",
                region, country
            ))
        })?;
    serde_json::from_value(nested.clone())
        .map_err(|e| DomainError::IncompleteComplianceData(e.to_string()))
}

/// Combine a checklist item with its compliance detail.
pub fn merge_checklist_item(
    item: ChecklistItem,
    detail: ComplianceDetail,
) -> ChecklistItemWithDetail {
    ChecklistItemWithDetail {
        item,
        location_content: detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockGenerationAdapter;
    use crate::domain::Priority;
    use serde_json::json;

    fn located_profile() -> Profile {
        Profile {
            industry: "tech".into(),
            country: "IN".into(),
            region: "Tamil Nadu".into(),
            ..Default::default()
        }
    }

    const CHECKLIST_REPLY: &str = r#"Here is your checklist:
[
  {"id": "business-registration", "title": "Business Registration", "description": "Register the company", "priority": "high"},
  {"id": "gst-registration", "title": "GST Registration", "description": "Register for GST", "priority": "medium", "completed": true}
]"#;

    #[tokio::test]
    async fn test_checklist_requires_location_without_calls() {
        let ai = Arc::new(MockGenerationAdapter::with_delay(0));
        let service = ChecklistService::new(ai.clone());

        let mut profile = located_profile();
        profile.region.clear();
        let err = service.list_checklist(&profile).await.unwrap_err();
        assert_eq!(err, DomainError::MissingRequiredField("region".into()));

        profile.country.clear();
        let err = service
            .checklist_item_detail("gst-registration", &profile)
            .await
            .unwrap_err();
        assert!(err.is_client_error());

        assert_eq!(ai.calls().await, 0);
    }

    #[tokio::test]
    async fn test_checklist_parses_items() {
        let ai = Arc::new(MockGenerationAdapter::scripted([CHECKLIST_REPLY]));
        let service = ChecklistService::new(ai);

        let items = service.list_checklist(&located_profile()).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "business-registration");
        assert_eq!(items[0].priority, Priority::High);
        assert!(items.iter().all(|i| !i.completed));
    }

    #[tokio::test]
    async fn test_checklist_propagates_extraction_failure() {
        let ai = Arc::new(MockGenerationAdapter::scripted(["I cannot produce a list."]));
        let service = ChecklistService::new(ai);

        let err = service.list_checklist(&located_profile()).await.unwrap_err();
        assert!(matches!(err, DomainError::ExtractionFailed(_)));
    }

    #[tokio::test]
    async fn test_checklist_propagates_transport_failure() {
        let ai = Arc::new(MockGenerationAdapter::with_delay(0));
        ai.push_error(DomainError::GenerationUnavailable("503".into()))
            .await;
        let service = ChecklistService::new(ai);

        let err = service.list_checklist(&located_profile()).await.unwrap_err();
        assert!(err.is_transport());
    }

    fn detail_reply(country: &str, region: &str) -> String {
        let detail = json!({
            "what": "Goods and Services Tax registration",
            "why": "Mandatory above the turnover threshold",
            "how": ["Apply on the GST portal", "Upload documents"],
            "timeline": "7 days",
            "cost": "Free",
            "resources": [{"title": "GST Portal", "url": "https://www.gst.gov.in"}],
            "documents": ["PAN", "Address proof"]
        });
        let mut by_region = serde_json::Map::new();
        by_region.insert(region.to_string(), detail);
        let mut by_country = serde_json::Map::new();
        by_country.insert(country.to_string(), Value::Object(by_region));
        json!({ "locationContent": Value::Object(by_country) }).to_string()
    }

    #[tokio::test]
    async fn test_item_detail_attaches_title() {
        let ai = Arc::new(MockGenerationAdapter::scripted([detail_reply(
            "IN",
            "Tamil Nadu",
        )]));
        let service = ChecklistService::new(ai);

        let detail = service
            .checklist_item_detail("gst-registration", &located_profile())
            .await
            .unwrap();

        assert_eq!(detail.title, "gst-registration");
        assert_eq!(detail.how.len(), 2);
        assert_eq!(detail.resources[0].url, "https://www.gst.gov.in");
    }

    #[tokio::test]
    async fn test_item_detail_for_other_location_is_incomplete() {
        let ai = Arc::new(MockGenerationAdapter::scripted([detail_reply(
            "US",
            "California",
        )]));
        let service = ChecklistService::new(ai);

        let err = service
            .checklist_item_detail("gst-registration", &located_profile())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::IncompleteComplianceData(_)));
    }

    #[tokio::test]
    async fn test_item_detail_missing_keys_is_incomplete() {
        let reply = r#"{"locationContent":{"IN":{"Tamil Nadu":{"what":"x","why":"y"}}}}"#;
        let ai = Arc::new(MockGenerationAdapter::scripted([reply]));
        let service = ChecklistService::new(ai);

        let err = service
            .checklist_item_detail("gst-registration", &located_profile())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::IncompleteComplianceData(_)));
    }

    #[test]
    fn test_merge_checklist_item() {
        let item = ChecklistItem {
            id: "gst-registration".into(),
            title: "GST Registration".into(),
            description: "Register for GST".into(),
            priority: Priority::Medium,
            completed: false,
        };
        let detail = ComplianceDetail {
            title: "gst-registration".into(),
            what: "w".into(),
            why: "y".into(),
            how: vec![],
            timeline: "t".into(),
            cost: "c".into(),
            resources: vec![],
            documents: vec![],
        };
        let merged = serde_json::to_value(merge_checklist_item(item, detail)).unwrap();
        assert_eq!(merged["id"], "gst-registration");
        assert_eq!(merged["locationContent"]["what"], "w");
    }
}
