//! Prompt building. Pure functions of their inputs; no I/O.
//!
//! Every artifact prompt ends with an explicit block describing the JSON shape expected back.

use serde_json::Value;

use super::entities::{ConversationTurn, MarketContext, Profile, RiskRecord, Role};

/// Optional profile fields, rendered as extra bullet lines when present.
fn optional_profile_lines(profile: &Profile) -> String {
    let mut lines = String::new();
    let extras = [
        ("Stage", &profile.stage),
        ("Known Competitors", &profile.competitors),
        ("Go-To-Market Strategy", &profile.go_to_market_strategy),
        ("Revenue Model", &profile.revenue_model),
    ];
    for (label, value) in extras {
        if let Some(v) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            lines.push_str(&format!("- {}: {}\n", label, v));
        }
    }
    lines
}

fn profile_block(profile: &Profile) -> String {
    format!(
        "- Industry: {}\n\
         - Budget Range: {}\n\
         - Team Size: {}\n\
         - Target Market: {}\n\
         - Location: {}, {}\n\
         - Problem Statement: {}\n\
         - Target Customer: {}\n\
         - Unique Value Proposition: {}\n{}",
        profile.industry,
        profile.budget_range,
        profile.team_size,
        profile.target_market_size,
        profile.country,
        profile.region,
        profile.problem_statement,
        profile.target_customer,
        profile.unique_value_proposition,
        optional_profile_lines(profile),
    )
}

pub fn roadmap_prompt(profile: &Profile) -> String {
    format!(
        r#"You are an experienced startup advisor. Create a phased execution roadmap for the following startup.

STARTUP PROFILE:
{profile}
Break the journey into 3-5 sequential phases (for example validation, launch, growth, scale).
Each phase has a realistic duration and 4-6 concrete tasks tailored to the industry, budget and location.

Respond ONLY with a JSON object in exactly this structure:
{{
  "phases": [
    {{
      "name": "Phase name",
      "duration": "e.g. 3 months",
      "percentComplete": 0,
      "tasks": [
        {{"title": "Task title", "description": "What to do and why", "status": "Not Started"}}
      ]
    }}
  ],
  "startupProfile": {{
    "industry": "{industry}",
    "budgetRange": "{budget}",
    "teamSize": "{team}",
    "region": "{region}"
  }}
}}"#,
        profile = profile_block(profile),
        industry = profile.industry,
        budget = profile.budget_range,
        team = profile.team_size,
        region = profile.region,
    )
}

pub fn task_guidance_prompt(task_title: &str, profile: &Profile) -> String {
    format!(
        r#"You are a hands-on startup mentor. A founder needs step-by-step guidance for the roadmap task "{task_title}".

STARTUP PROFILE:
{profile}
Give practical, location-aware instructions the founder can act on this week.

Respond ONLY with a JSON object in exactly this structure:
{{
  "taskTitle": "{task_title}",
  "overview": "Two or three sentences on what this task achieves",
  "steps": [{{"title": "Step title", "description": "How to do it"}}],
  "resources": [{{"title": "Resource name", "url": "https://example.com"}}],
  "estimatedTime": "e.g. 2 weeks",
  "tips": ["Tip 1", "Tip 2"]
}}"#,
        task_title = task_title,
        profile = profile_block(profile),
    )
}

pub fn checklist_prompt(profile: &Profile) -> String {
    let (country, region) = (&profile.country, &profile.region);
    format!(
        r#"Generate a comprehensive legal and compliance checklist for startups in {region}, {country}.
Include 10 essential items a {industry} startup must complete to operate legally in {region}, {country}.

Format the response as a JSON array with the following structure for each item:
[
  {{
    "id": "item-id-in-kebab-case",
    "title": "Human readable title",
    "description": "Brief description of what this requirement entails",
    "priority": "high/medium/low"
  }}
]

Ensure each description is concise but informative enough for entrepreneurs to understand the requirement."#,
        region = region,
        country = country,
        industry = profile.industry,
    )
}

pub fn compliance_detail_prompt(item_id: &str, profile: &Profile) -> String {
    let (country, region) = (&profile.country, &profile.region);
    format!(
        r#"Provide detailed compliance information for {item_id} in {region}, {country}.
Format the response as a JSON object with the following structure:
{{
  "locationContent": {{
    "{country}": {{
      "{region}": {{
        "what": "Clear explanation of what this requirement is",
        "why": "Importance and consequences of non-compliance",
        "how": ["Step 1", "Step 2", "Step 3"],
        "timeline": "Expected completion time",
        "cost": "Range of costs",
        "resources": [{{"title": "Resource 1", "url": "https://example.com"}}],
        "documents": ["Document 1", "Document 2"]
      }}
    }}
  }}
}}

Ensure all information is accurate, up-to-date, and specific to {region}, {country}."#,
        item_id = item_id,
        region = region,
        country = country,
    )
}

fn context_json(value: &Option<Value>) -> String {
    match value {
        Some(v) => serde_json::to_string_pretty(v).unwrap_or_default(),
        None => "No data available".to_string(),
    }
}

pub fn swot_prompt(profile: &Profile, market: &MarketContext) -> String {
    format!(
        r#"You are an expert startup analyst with deep knowledge of the {industry} industry.

TASK: Generate a detailed, fact-based SWOT analysis for a startup with the following profile:

STARTUP PROFILE:
{profile}
INDUSTRY CONTEXT:
{industry_stats}

REGIONAL BUSINESS ENVIRONMENT:
{regional_data}

FUNDING LANDSCAPE:
{funding_trends}

IMPORTANT INSTRUCTIONS:
1. Base your analysis ONLY on the provided data and verifiable industry facts
2. Identify SPECIFIC strengths, weaknesses, opportunities and threats - not generic statements
3. Reference actual market conditions, competitors and trends in {industry}
4. For each point, provide a brief explanation of its business impact
5. Include quantitative metrics whenever possible
6. Focus on actionable insights relevant to {country} and specifically {region}
7. Include 5-7 points for each SWOT category, ordered by importance

FORMAT YOUR RESPONSE AS JSON:
{{
  "strengths": [
    {{"point": "Strength 1", "impact": "Business impact", "evidence": "Supporting evidence"}}
  ],
  "weaknesses": [],
  "opportunities": [],
  "threats": []
}}"#,
        industry = profile.industry,
        profile = profile_block(profile),
        industry_stats = context_json(&market.industry_stats),
        regional_data = context_json(&market.regional_data),
        funding_trends = context_json(&market.funding_trends),
        country = profile.country,
        region = profile.region,
    )
}

pub fn competitor_prompt(profile: &Profile) -> String {
    format!(
        r#"You are a competitive intelligence analyst specializing in the {industry} industry.

TASK: Identify 3-5 relevant competitors for a startup with this profile:
- Problem solving: {problem}
- Target customer: {customer}
- Value proposition: {uvp}
- Region: {country}, {region}

For each competitor, provide:
1. Company name (use REAL companies that actually exist)
2. Brief description of their solution
3. Key differentiators
4. Strengths and weaknesses relative to this startup
5. Opportunities and threats they create for this startup
6. Approximate market share or size if available

Format as JSON array:
[
  {{
    "name": "Competitor Name",
    "description": "What they do",
    "differentiators": ["diff1", "diff2"],
    "strengths": ["strength1", "strength2"],
    "weaknesses": ["weakness1", "weakness2"],
    "opportunities": ["opportunity1"],
    "threats": ["threat1"],
    "marketShare": "estimate or N/A"
  }}
]

IMPORTANT: Only include REAL companies that actually exist in this market.
Verify that each competitor is active in {country} or serves this market remotely."#,
        industry = profile.industry,
        problem = profile.problem_statement,
        customer = profile.target_customer,
        uvp = profile.unique_value_proposition,
        country = profile.country,
        region = profile.region,
    )
}

pub fn growth_strategy_prompt(profile: &Profile, risk: &RiskRecord) -> String {
    let factors = if risk.risk_factors.is_empty() {
        "- None reported".to_string()
    } else {
        risk.risk_factors
            .iter()
            .map(|f| format!("- {}", f))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!(
        r#"You are a startup growth strategist. A statistical model has assessed the following startup.

STARTUP PROFILE:
{profile}
MODEL PREDICTION:
- Failure rate: {failure}
- Success rate: {success}
- Key risk factors:
{factors}

Using the prediction as context, assess five risk dimensions and suggest how to improve each.
For every dimension give a risk percentage (0-100), a risk level of "Low", "Medium" or "High",
and one concrete suggestion.

Respond ONLY with a JSON object in exactly this structure:
{{
  "growthMessage": "One paragraph growth strategy",
  "insights": {{
    "marketFit": {{"percentage": 40, "riskLevel": "Medium", "suggestion": "..."}},
    "cashFlow": {{"percentage": 40, "riskLevel": "Medium", "suggestion": "..."}},
    "teamComposition": {{"percentage": 40, "riskLevel": "Medium", "suggestion": "..."}},
    "competition": {{"percentage": 40, "riskLevel": "Medium", "suggestion": "..."}},
    "scalability": {{"percentage": 40, "riskLevel": "Medium", "suggestion": "..."}}
  }}
}}"#,
        profile = profile_block(profile),
        failure = risk.failure_rate,
        success = risk.success_rate,
        factors = factors,
    )
}

const MENTOR_SYSTEM_INSTRUCTIONS: &str = r#"You are an AI Mentor specialized in providing guidance to startup founders and entrepreneurs.

IMPORTANT RULES:
1. Only provide information related to business, startups, entrepreneurship, and legal compliance.
2. Do not discuss topics unrelated to business or startups.
3. Keep responses concise, practical, and actionable.
4. For legal questions, emphasize that you're providing general guidance and recommend consulting with legal professionals.
5. Base your advice on established business practices and startup methodologies.
6. If asked about something outside your expertise, politely redirect to business topics.
7. Avoid political opinions, personal advice unrelated to business, or controversial topics.
8. Focus on providing value to early-stage entrepreneurs with clear, actionable steps.

RESPONSE FORMAT:
- Keep responses under 250 words unless detailed explanation is specifically requested
- Use bullet points for steps or lists
- Highlight important points or warnings in bold
- Include a short, actionable conclusion"#;

/// Mentor prompt: policy, optional founder context, prior turns, then the new message.
pub fn mentor_prompt(
    history: &[ConversationTurn],
    message: &str,
    profile: Option<&Profile>,
) -> String {
    let mut prompt = String::from(MENTOR_SYSTEM_INSTRUCTIONS);
    prompt.push_str("\n\n");

    if let Some(profile) = profile {
        prompt.push_str("Founder context:\n");
        prompt.push_str(&profile_block(profile));
        prompt.push('\n');
    }

    prompt.push_str("Conversation history:\n");
    for turn in history {
        let speaker = match turn.role {
            Role::User => "Human",
            Role::Assistant => "AI Mentor",
        };
        prompt.push_str(&format!("{}: {}\n", speaker, turn.content));
    }
    prompt.push_str(&format!("Human: {}\n\nAI Mentor:", message));
    prompt
}

pub fn follow_up_prompt(question: &str, answer: &str) -> String {
    format!(
        r#"Based on this conversation about startups and business:

User Question: {question}

AI Response: {answer}

Generate exactly 3 short, specific follow-up questions that the user might want to ask next.
These should be natural continuations of the conversation and strictly related to business and startups.

Format your response as a JSON array of strings with no explanation:
["Question 1?", "Question 2?", "Question 3?"]"#,
        question = question,
        answer = answer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Rate;

    fn profile() -> Profile {
        Profile {
            industry: "tech".into(),
            country: "IN".into(),
            region: "Tamil Nadu".into(),
            problem_statement: "Farmers lack price data".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_prompts_are_deterministic() {
        let p = profile();
        assert_eq!(roadmap_prompt(&p), roadmap_prompt(&p));
        assert_eq!(checklist_prompt(&p), checklist_prompt(&p));
        let market = MarketContext::default();
        assert_eq!(swot_prompt(&p, &market), swot_prompt(&p, &market));
    }

    #[test]
    fn test_roadmap_prompt_embeds_profile_and_shape() {
        let prompt = roadmap_prompt(&profile());
        assert!(prompt.contains("- Industry: tech"));
        assert!(prompt.contains("- Location: IN, Tamil Nadu"));
        assert!(prompt.contains("\"percentComplete\": 0"));
        assert!(prompt.contains("\"region\": \"Tamil Nadu\""));
    }

    #[test]
    fn test_optional_fields_only_when_present() {
        let mut p = profile();
        assert!(!roadmap_prompt(&p).contains("Revenue Model"));
        p.revenue_model = Some("Subscription".into());
        assert!(roadmap_prompt(&p).contains("- Revenue Model: Subscription"));
    }

    #[test]
    fn test_compliance_prompt_keys_by_location() {
        let prompt = compliance_detail_prompt("gst-registration", &profile());
        assert!(prompt.contains("compliance information for gst-registration in Tamil Nadu, IN"));
        assert!(prompt.contains("\"IN\": {"));
        assert!(prompt.contains("\"Tamil Nadu\": {"));
    }

    #[test]
    fn test_swot_prompt_marks_missing_context() {
        let prompt = swot_prompt(&profile(), &MarketContext::default());
        assert!(prompt.contains("INDUSTRY CONTEXT:\nNo data available"));
    }

    #[test]
    fn test_growth_prompt_includes_prediction() {
        let risk = RiskRecord {
            failure_rate: Rate::Text("62.5%".into()),
            success_rate: Rate::Number(37.5),
            risk_factors: vec!["High competition".into()],
        };
        let prompt = growth_strategy_prompt(&profile(), &risk);
        assert!(prompt.contains("Failure rate: 62.5%"));
        assert!(prompt.contains("Success rate: 37.5%"));
        assert!(prompt.contains("- High competition"));
    }

    #[test]
    fn test_mentor_prompt_renders_history() {
        let history = vec![
            ConversationTurn::user("Q1"),
            ConversationTurn::assistant("A1"),
        ];
        let prompt = mentor_prompt(&history, "Q2", None);
        assert!(prompt.starts_with(MENTOR_SYSTEM_INSTRUCTIONS));
        assert!(prompt.contains("Human: Q1\nAI Mentor: A1\nHuman: Q2\n\nAI Mentor:"));
        assert!(!prompt.contains("Founder context"));
    }

    #[test]
    fn test_mentor_prompt_with_profile() {
        let p = profile();
        let prompt = mentor_prompt(&[], "Hi", Some(&p));
        assert!(prompt.contains("Founder context:\n- Industry: tech"));
    }
}
