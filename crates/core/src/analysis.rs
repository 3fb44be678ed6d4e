//! The documentation analysis data model.
//!
//! Defines the closed [`Rating`] scale, the per-category analysis record, and
//! the four-category [`DocumentationAnalysis`] that every analyzer invocation
//! produces. Model output is parsed in two explicit steps: lenient JSON
//! decoding into raw records with string scores, then validation into the
//! typed model — an unrecognized score is a typed error, never a silently
//! accepted string.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ordinal quality label for a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Rating {
    /// Numeric value used for aggregation: Excellent 4 down to Poor 1.
    pub fn points(self) -> u8 {
        match self {
            Rating::Excellent => 4,
            Rating::Good => 3,
            Rating::Fair => 2,
            Rating::Poor => 1,
        }
    }

    /// Strict parse of a score label. Exact match only.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Excellent" => Some(Rating::Excellent),
            "Good" => Some(Rating::Good),
            "Fair" => Some(Rating::Fair),
            "Poor" => Some(Rating::Poor),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::Poor => "Poor",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analysis of a single documentation quality category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    pub score: Rating,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Complete documentation analysis across the four fixed categories.
///
/// All four keys are always present in any value passed between components;
/// the fallback constructor synthesizes all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationAnalysis {
    pub readability: CategoryAnalysis,
    pub structure: CategoryAnalysis,
    pub completeness: CategoryAnalysis,
    pub style_guidelines: CategoryAnalysis,
}

/// Issue text carried by the fallback record after a failed analysis.
pub const FALLBACK_ISSUE: &str = "Analysis failed";
/// Suggestion text carried by the fallback record after a failed analysis.
pub const FALLBACK_SUGGESTION: &str = "Please try again";

impl DocumentationAnalysis {
    /// Category keys in their fixed presentation order.
    pub const CATEGORY_NAMES: [&'static str; 4] = ["readability", "structure", "completeness", "style_guidelines"];

    /// The categories in fixed order, paired with their keys.
    pub fn categories(&self) -> [(&'static str, &CategoryAnalysis); 4] {
        [
            ("readability", &self.readability),
            ("structure", &self.structure),
            ("completeness", &self.completeness),
            ("style_guidelines", &self.style_guidelines),
        ]
    }

    /// The four category scores in fixed order.
    pub fn scores(&self) -> [Rating; 4] {
        [self.readability.score, self.structure.score, self.completeness.score, self.style_guidelines.score]
    }

    /// The deterministic record substituted when analysis fails.
    pub fn fallback() -> Self {
        let category = CategoryAnalysis {
            score: Rating::Fair,
            issues: vec![FALLBACK_ISSUE.to_string()],
            suggestions: vec![FALLBACK_SUGGESTION.to_string()],
        };

        Self {
            readability: category.clone(),
            structure: category.clone(),
            completeness: category.clone(),
            style_guidelines: category,
        }
    }
}

/// Typed failure from [`parse_analysis`].
#[derive(Debug, Error)]
pub enum AnalysisParseError {
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("category '{category}' has unrecognized score '{score}'")]
    InvalidScore { category: &'static str, score: String },
}

#[derive(Debug, Deserialize)]
struct RawCategory {
    score: String,
    #[serde(default)]
    issues: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    readability: RawCategory,
    structure: RawCategory,
    completeness: RawCategory,
    style_guidelines: RawCategory,
}

/// Parses a raw model response into a validated [`DocumentationAnalysis`].
///
/// Code fences around the JSON payload are tolerated. Missing categories and
/// unrecognized score labels both fail with a typed error; a partially
/// matching structure is never accepted.
pub fn parse_analysis(raw: &str) -> Result<DocumentationAnalysis, AnalysisParseError> {
    let cleaned = strip_code_fence(raw);
    let parsed: RawAnalysis = serde_json::from_str(cleaned)?;

    Ok(DocumentationAnalysis {
        readability: validate_category("readability", parsed.readability)?,
        structure: validate_category("structure", parsed.structure)?,
        completeness: validate_category("completeness", parsed.completeness)?,
        style_guidelines: validate_category("style_guidelines", parsed.style_guidelines)?,
    })
}

fn validate_category(category: &'static str, raw: RawCategory) -> Result<CategoryAnalysis, AnalysisParseError> {
    match Rating::parse(&raw.score) {
        Some(score) => Ok(CategoryAnalysis { score, issues: raw.issues, suggestions: raw.suggestions }),
        None => Err(AnalysisParseError::InvalidScore { category, score: raw.score }),
    }
}

/// Drops a surrounding markdown code fence, if any.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let body = trimmed.trim_start_matches('`');
    let body = match body.split_once('\n') {
        // the first line is the fence's language tag
        Some((_, rest)) => rest,
        None => body,
    };
    body.trim_end().trim_end_matches('`').trim_end()
}

/// Schema description interpolated into the analysis prompt.
pub fn format_instructions() -> String {
    let schema = serde_json::json!({
        "readability": {"score": "Excellent | Good | Fair | Poor", "issues": ["..."], "suggestions": ["..."]},
        "structure": {"score": "Excellent | Good | Fair | Poor", "issues": ["..."], "suggestions": ["..."]},
        "completeness": {"score": "Excellent | Good | Fair | Poor", "issues": ["..."], "suggestions": ["..."]},
        "style_guidelines": {"score": "Excellent | Good | Fair | Poor", "issues": ["..."], "suggestions": ["..."]},
    });

    format!(
        "Respond only with a JSON object of exactly this shape, with no text before or after it:\n{}\n\
         Every category must be present with a score of Excellent, Good, Fair, or Poor, \
         a list of identified issues, and a list of improvement suggestions.",
        serde_json::to_string_pretty(&schema).expect("static schema serializes")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_RESPONSE: &str = r#"{
        "readability": {"score": "Good", "issues": ["Dense intro"], "suggestions": ["Shorten sentences"]},
        "structure": {"score": "Excellent", "issues": [], "suggestions": []},
        "completeness": {"score": "Fair", "issues": ["No error docs"], "suggestions": ["Document failure modes"]},
        "style_guidelines": {"score": "Poor", "issues": ["Inconsistent headings"], "suggestions": ["Adopt a style guide"]}
    }"#;

    #[test]
    fn test_parse_valid_response() {
        let analysis = parse_analysis(VALID_RESPONSE).unwrap();
        assert_eq!(analysis.readability.score, Rating::Good);
        assert_eq!(analysis.structure.score, Rating::Excellent);
        assert_eq!(analysis.completeness.issues, vec!["No error docs"]);
        assert_eq!(analysis.style_guidelines.score, Rating::Poor);
    }

    #[test]
    fn test_parse_fenced_response() {
        let fenced = format!("```json\n{}\n```", VALID_RESPONSE);
        let analysis = parse_analysis(&fenced).unwrap();
        assert_eq!(analysis.readability.score, Rating::Good);
    }

    #[test]
    fn test_unrecognized_score_is_typed_error() {
        let raw = VALID_RESPONSE.replace("\"Good\"", "\"Amazing\"");
        let result = parse_analysis(&raw);

        match result {
            Err(AnalysisParseError::InvalidScore { category, score }) => {
                assert_eq!(category, "readability");
                assert_eq!(score, "Amazing");
            }
            other => panic!("expected InvalidScore, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_category_rejected() {
        let raw = r#"{"readability": {"score": "Good", "issues": [], "suggestions": []}}"#;
        assert!(matches!(parse_analysis(raw), Err(AnalysisParseError::Json(_))));
    }

    #[test]
    fn test_rating_parse_is_exact() {
        assert_eq!(Rating::parse("Excellent"), Some(Rating::Excellent));
        assert_eq!(Rating::parse("excellent"), None);
        assert_eq!(Rating::parse("N/A"), None);
        assert_eq!(Rating::parse(""), None);
    }

    #[test]
    fn test_rating_points() {
        assert_eq!(Rating::Excellent.points(), 4);
        assert_eq!(Rating::Good.points(), 3);
        assert_eq!(Rating::Fair.points(), 2);
        assert_eq!(Rating::Poor.points(), 1);
    }

    #[test]
    fn test_fallback_shape() {
        let fallback = DocumentationAnalysis::fallback();

        for (_, category) in fallback.categories() {
            assert_eq!(category.score, Rating::Fair);
            assert_eq!(category.issues, vec![FALLBACK_ISSUE]);
            assert_eq!(category.suggestions, vec![FALLBACK_SUGGESTION]);
        }
    }

    #[test]
    fn test_analysis_serialization_uses_labels() {
        let json = serde_json::to_string(&DocumentationAnalysis::fallback()).unwrap();
        assert!(json.contains("\"score\":\"Fair\""));
        assert!(json.contains("style_guidelines"));
    }

    #[test]
    fn test_format_instructions_mention_all_categories() {
        let instructions = format_instructions();
        for name in DocumentationAnalysis::CATEGORY_NAMES {
            assert!(instructions.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(strip_code_fence("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
    }
}
