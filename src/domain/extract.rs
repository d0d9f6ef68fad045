//! Structured extraction from free model text.
//!
//! Two strategies, selected by [`Strategy`]:
//! - `Span`: take the greedy first-to-last bracket span of the requested [`Shape`] and parse it
//!   as JSON.
//! - `SwotSections`: line-oriented parse of a SWOT narrative into the four sections. Never fails.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::DomainError;
use super::entities::{AnalysisPoint, SwotAnalysis};

const FALLBACK_IMPACT: &str = "Impact analysis not available in non-JSON format";
const FALLBACK_EVIDENCE: &str = "Supporting data not available in non-JSON format";

/// Container kind expected in the model text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Array,
    Object,
}

impl Shape {
    fn brackets(self) -> (char, char) {
        match self {
            Shape::Array => ('[', ']'),
            Shape::Object => ('{', '}'),
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::Array => f.write_str("array"),
            Shape::Object => f.write_str("object"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Span(Shape),
    SwotSections,
}

/// Extract a JSON value from `text` with the given strategy.
pub fn extract(text: &str, strategy: Strategy) -> Result<Value, DomainError> {
    match strategy {
        Strategy::Span(shape) => extract_json(text, shape),
        Strategy::SwotSections => serde_json::to_value(parse_swot_sections(text))
            .map_err(|e| DomainError::MalformedPayload(e.to_string())),
    }
}

/// Locate the span from the first opening bracket to the last closing bracket of `shape`.
pub fn find_span(text: &str, shape: Shape) -> Option<&str> {
    let (open, close) = shape.brackets();
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if start < end {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// Parse the bracket span of `shape` in `text`.
///
/// `ExtractionFailed` when there is no span, `MalformedPayload` when the span is not JSON.
pub fn extract_json(text: &str, shape: Shape) -> Result<Value, DomainError> {
    let span = find_span(text, shape).ok_or_else(|| {
        DomainError::ExtractionFailed(format!("no JSON {} found in response", shape))
    })?;
    serde_json::from_str(span).map_err(|e| DomainError::MalformedPayload(e.to_string()))
}

/// Like [`extract_json`], then deserialize into `T`. A shape mismatch is `MalformedPayload`.
pub fn extract_as<T: DeserializeOwned>(text: &str, shape: Shape) -> Result<T, DomainError> {
    let value = extract_json(text, shape)?;
    serde_json::from_value(value).map_err(|e| DomainError::MalformedPayload(e.to_string()))
}

/// Strip a surrounding markdown code fence (```` ```json ... ``` ```` or ```` ``` ... ``` ````).
pub fn strip_code_fences(raw_text: &str) -> &str {
    let trimmed = raw_text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    let without_prefix = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    match without_prefix.rfind("```") {
        Some(end_idx) => without_prefix[..end_idx].trim(),
        None => without_prefix.trim(),
    }
}

#[derive(Clone, Copy)]
enum Section {
    Strengths,
    Weaknesses,
    Opportunities,
    Threats,
}

/// Line-oriented SWOT parse.
///
/// A line mentioning a section name switches the current section; bullet or numbered lines
/// under an active section become points with placeholder impact/evidence.
pub fn parse_swot_sections(text: &str) -> SwotAnalysis {
    let mut swot = SwotAnalysis::default();
    let mut current: Option<Section> = None;

    for line in text.lines() {
        let lower = line.to_lowercase();
        if lower.contains("strengths") {
            current = Some(Section::Strengths);
        } else if lower.contains("weaknesses") {
            current = Some(Section::Weaknesses);
        } else if lower.contains("opportunities") {
            current = Some(Section::Opportunities);
        } else if lower.contains("threats") {
            current = Some(Section::Threats);
        } else if let Some(section) = current {
            let Some(point) = strip_marker(line) else {
                continue;
            };
            if point.is_empty() {
                continue;
            }
            let entry = AnalysisPoint {
                point: point.to_string(),
                impact: FALLBACK_IMPACT.to_string(),
                evidence: FALLBACK_EVIDENCE.to_string(),
            };
            match section {
                Section::Strengths => swot.strengths.push(entry),
                Section::Weaknesses => swot.weaknesses.push(entry),
                Section::Opportunities => swot.opportunities.push(entry),
                Section::Threats => swot.threats.push(entry),
            }
        }
    }

    swot
}

/// Returns the text after a leading `-`, `*`, `•` or `N.`/`N)` marker, or None for plain lines.
fn strip_marker(line: &str) -> Option<&str> {
    let t = line.trim();
    if let Some(rest) = t.strip_prefix(&['-', '*', '•'][..]) {
        return Some(rest.trim());
    }
    let digits = t.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    t[digits..].strip_prefix(&['.', ')'][..]).map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_object_with_prose() {
        let text = "Here is the plan:\n{\"a\": 1, \"b\": [1, 2]}\nHope it helps.";
        let value = extract_json(text, Shape::Object).unwrap();
        assert_eq!(value, json!({"a": 1, "b": [1, 2]}));
    }

    #[test]
    fn test_extract_array_well_formed_is_unchanged() {
        let original = json!([{"id": "x", "n": 2}, "y", 3]);
        let text = format!("prefix {} suffix", original);
        assert_eq!(extract_json(&text, Shape::Array).unwrap(), original);
    }

    #[test]
    fn test_extract_no_span_fails() {
        let err = extract_json("no json here", Shape::Array).unwrap_err();
        assert!(matches!(err, DomainError::ExtractionFailed(_)));

        let err = extract_json("closing first ] then [", Shape::Array).unwrap_err();
        assert!(matches!(err, DomainError::ExtractionFailed(_)));
    }

    #[test]
    fn test_extract_malformed_span() {
        let err = extract_json("{\"a\": }", Shape::Object).unwrap_err();
        assert!(matches!(err, DomainError::MalformedPayload(_)));
    }

    #[test]
    fn test_extract_greedy_spans_multiple_objects() {
        // First-to-last match covers both objects, which is not one JSON value.
        let err = extract_json("{\"a\":1} and {\"b\":2}", Shape::Object).unwrap_err();
        assert!(matches!(err, DomainError::MalformedPayload(_)));
    }

    #[test]
    fn test_extract_as_shape_mismatch() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Needs {
            id: String,
        }
        let err = extract_as::<Needs>("{\"other\": 1}", Shape::Object).unwrap_err();
        assert!(matches!(err, DomainError::MalformedPayload(_)));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_swot_sections_from_narrative() {
        let text = "\
## Strengths
1. Low cost base in Chennai
- Strong technical founders
Some plain sentence that is ignored
## Weaknesses
* Small team
## Opportunities
2) Government incentives
## Threats
- Incumbents";
        let swot = parse_swot_sections(text);
        assert_eq!(swot.strengths.len(), 2);
        assert_eq!(swot.strengths[0].point, "Low cost base in Chennai");
        assert_eq!(swot.strengths[1].point, "Strong technical founders");
        assert_eq!(swot.strengths[0].impact, FALLBACK_IMPACT);
        assert_eq!(swot.weaknesses[0].point, "Small team");
        assert_eq!(swot.opportunities[0].point, "Government incentives");
        assert_eq!(swot.threats[0].point, "Incumbents");
    }

    #[test]
    fn test_swot_sections_never_fail() {
        let value = extract("", Strategy::SwotSections).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        for key in ["strengths", "weaknesses", "opportunities", "threats"] {
            assert_eq!(obj[key], json!([]));
        }
    }

    #[test]
    fn test_bullets_before_any_section_are_ignored() {
        let swot = parse_swot_sections("- orphan bullet\nStrengths:\n- kept");
        assert_eq!(swot.strengths.len(), 1);
        assert_eq!(swot.strengths[0].point, "kept");
    }

    #[test]
    fn test_strategy_span_dispatch() {
        let value = extract("x [1,2] y", Strategy::Span(Shape::Array)).unwrap();
        assert_eq!(value, json!([1, 2]));
    }
}
