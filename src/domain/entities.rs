//! Domain entities. Pure data structures for the core business.
//!
//! Request/response records only; nothing here is persisted. Field names serialize in the
//! camelCase the front end expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::DomainError;

/// Caller-supplied startup description driving every prompt.
///
/// No field is validated beyond presence checks at the pipeline boundary; missing fields
/// deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub industry: String,
    #[serde(alias = "budget")]
    pub budget_range: String,
    pub team_size: String,
    #[serde(alias = "marketSize")]
    pub target_market_size: String,
    pub country: String,
    pub region: String,
    pub problem_statement: String,
    pub target_customer: String,
    pub unique_value_proposition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub go_to_market_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
}

impl Profile {
    /// Checklist and compliance lookups are location specific.
    pub fn require_location(&self) -> Result<(), DomainError> {
        require("country", &self.country)?;
        require("region", &self.region)
    }
}

/// Fails with `MissingRequiredField` when `value` is blank.
pub fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::MissingRequiredField(field.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message of a mentor conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Legal checklist
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub title: String,
    #[serde(default, alias = "details")]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    /// Owned by the caller; always `false` when generated.
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

/// Location-specific compliance guidance for one checklist item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceDetail {
    #[serde(default)]
    pub title: String,
    pub what: String,
    pub why: String,
    pub how: Vec<String>,
    pub timeline: String,
    pub cost: String,
    pub resources: Vec<Resource>,
    pub documents: Vec<String>,
}

/// A checklist item merged with its compliance detail.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemWithDetail {
    #[serde(flatten)]
    pub item: ChecklistItem,
    pub location_content: ComplianceDetail,
}

// ─────────────────────────────────────────────────────────────────────────────
// SWOT and competitors
// ─────────────────────────────────────────────────────────────────────────────

/// One SWOT entry. A bare string in the reply is taken as the point alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPoint")]
pub struct AnalysisPoint {
    pub point: String,
    pub impact: String,
    pub evidence: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPoint {
    Text(String),
    Detailed {
        point: String,
        #[serde(default)]
        impact: String,
        #[serde(default)]
        evidence: String,
    },
}

impl From<RawPoint> for AnalysisPoint {
    fn from(raw: RawPoint) -> Self {
        match raw {
            RawPoint::Text(point) => AnalysisPoint {
                point,
                impact: String::new(),
                evidence: String::new(),
            },
            RawPoint::Detailed {
                point,
                impact,
                evidence,
            } => AnalysisPoint {
                point,
                impact,
                evidence,
            },
        }
    }
}

/// All four sections are required when parsed from JSON; a reply lacking one is not a SWOT.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwotAnalysis {
    pub strengths: Vec<AnalysisPoint>,
    pub weaknesses: Vec<AnalysisPoint>,
    pub opportunities: Vec<AnalysisPoint>,
    pub threats: Vec<AnalysisPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub differentiators: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub threats: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub market_share: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Market context attached to a profile before SWOT prompting. Each lookup is optional; a
/// failed lookup is simply absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketContext {
    pub industry_stats: Option<serde_json::Value>,
    pub regional_data: Option<serde_json::Value>,
    pub funding_trends: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwotBundle {
    pub swot: SwotAnalysis,
    pub competitors: Vec<Competitor>,
    pub full_analysis: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Roadmap
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapPlan {
    pub phases: Vec<Phase>,
    #[serde(
        rename = "startupProfile",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub startup_profile: Option<RoadmapProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient_whole_percent")]
    pub percent_complete: u32,
    #[serde(default, alias = "steps")]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "not_started")]
    pub status: String,
}

fn not_started() -> String {
    "Not Started".to_string()
}

/// Profile echo the model includes alongside the phases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoadmapProfile {
    pub industry: String,
    pub budget_range: String,
    pub team_size: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskGuidance {
    #[serde(default)]
    pub task_title: String,
    pub overview: String,
    #[serde(default)]
    pub steps: Vec<GuidanceStep>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceStep {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Failure prediction
// ─────────────────────────────────────────────────────────────────────────────

/// Normalized input of the risk-scoring model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub industry: String,
    pub budget: String,
    pub team_size: String,
    pub market_size: String,
    pub country: String,
}

/// A rate as the scoring model reports it: a number or a string such as `"42.5%"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rate {
    Number(f64),
    Text(String),
}

impl Rate {
    pub fn percent(&self) -> Option<f64> {
        match self {
            Rate::Number(n) => Some(*n),
            Rate::Text(s) => s.trim().trim_end_matches('%').trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rate::Number(n) => write!(f, "{}%", n),
            Rate::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRecord {
    pub failure_rate: Rate,
    pub success_rate: Rate,
    pub risk_factors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl From<String> for RiskLevel {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "high" => RiskLevel::High,
            _ => RiskLevel::Medium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    #[serde(default, deserialize_with = "lenient_percent")]
    pub percentage: f64,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub market_fit: Insight,
    pub cash_flow: Insight,
    pub team_composition: Insight,
    pub competition: Insight,
    pub scalability: Insight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthStrategy {
    pub growth_message: String,
    pub insights: Insights,
}

/// Accepts strings, numbers and null for free-form text fields the model fills loosely.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Accepts `35`, `35.4`, `"35"` or `"35%"`, clamped to 0..=100. Anything else is 0.
fn lenient_percent<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let raw = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(raw
        .filter(|p| p.is_finite())
        .map(|p| p.clamp(0.0, 100.0))
        .unwrap_or(0.0))
}

/// Whole-number form of [`lenient_percent`], rounded to the nearest point.
fn lenient_whole_percent<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_percent(deserializer).map(|p| p.round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_accepts_form_aliases() {
        let profile: Profile = serde_json::from_value(json!({
            "industry": "tech",
            "budget": "seed",
            "marketSize": "large",
            "country": "IN"
        }))
        .unwrap();
        assert_eq!(profile.budget_range, "seed");
        assert_eq!(profile.target_market_size, "large");
        assert_eq!(profile.region, "");
    }

    #[test]
    fn test_require_location() {
        let mut profile = Profile {
            country: "IN".into(),
            ..Default::default()
        };
        assert_eq!(
            profile.require_location(),
            Err(DomainError::MissingRequiredField("region".into()))
        );
        profile.region = "Tamil Nadu".into();
        assert!(profile.require_location().is_ok());
    }

    #[test]
    fn test_priority_is_lenient() {
        let item: ChecklistItem = serde_json::from_value(json!({
            "id": "gst-registration",
            "title": "GST Registration",
            "details": "Register for GST",
            "priority": "High"
        }))
        .unwrap();
        assert_eq!(item.priority, Priority::High);
        assert_eq!(item.description, "Register for GST");
        assert!(!item.completed);
        assert_eq!(serde_json::to_value(item.priority).unwrap(), json!("high"));
    }

    #[test]
    fn test_rate_percent() {
        assert_eq!(Rate::Text("42.5%".into()).percent(), Some(42.5));
        assert_eq!(Rate::Number(12.0).percent(), Some(12.0));
        assert_eq!(Rate::Text("n/a".into()).percent(), None);
    }

    #[test]
    fn test_competitor_market_share_accepts_numbers() {
        let c: Competitor = serde_json::from_value(json!({
            "name": "Zoho",
            "marketShare": 12.5
        }))
        .unwrap();
        assert_eq!(c.market_share, "12.5");
        assert!(!c.verified);
        assert!(c.last_updated.is_none());
    }

    #[test]
    fn test_analysis_point_accepts_bare_string() {
        let swot: SwotAnalysis = serde_json::from_value(json!({
            "strengths": ["Low cost base", {"point": "Strong founders", "impact": "Speed"}],
            "weaknesses": ["Small team"],
            "opportunities": [],
            "threats": ["Incumbents"]
        }))
        .unwrap();
        assert_eq!(swot.strengths[0].point, "Low cost base");
        assert_eq!(swot.strengths[0].impact, "");
        assert_eq!(swot.strengths[1].impact, "Speed");
        assert_eq!(swot.threats[0].point, "Incumbents");
    }

    #[test]
    fn test_percent_complete_is_lenient() {
        let parse = |v: serde_json::Value| -> u32 {
            let phase: Phase = serde_json::from_value(json!({"name": "Launch", "percentComplete": v}))
                .unwrap();
            phase.percent_complete
        };
        assert_eq!(parse(json!(0.0)), 0);
        assert_eq!(parse(json!("40%")), 40);
        assert_eq!(parse(json!(33.6)), 34);
        assert_eq!(parse(json!(250)), 100);
        assert_eq!(parse(json!("soon")), 0);
        assert_eq!(parse(json!(null)), 0);
    }

    #[test]
    fn test_insight_percentage_accepts_percent_string() {
        let insight: Insight = serde_json::from_value(json!({
            "percentage": "35%",
            "riskLevel": "Medium",
            "suggestion": "Run paid pilots"
        }))
        .unwrap();
        assert_eq!(insight.percentage, 35.0);
    }

    #[test]
    fn test_risk_level_serializes_capitalized() {
        let level: RiskLevel = serde_json::from_value(json!("high")).unwrap();
        assert_eq!(level, RiskLevel::High);
        assert_eq!(serde_json::to_value(level).unwrap(), json!("High"));
    }
}
