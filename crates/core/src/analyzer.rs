//! Model-backed analysis and revision of extracted documentation.
//!
//! [`DocAnalyzer`] owns the two prompt templates and the model client.
//! Analysis never fails outwardly: any model or parse failure is absorbed and
//! the deterministic fallback record is returned with a `degraded` marker, so
//! downstream rendering always has a complete four-category record. Revision
//! has no such fallback — a failed rewrite propagates.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::analysis::{DocumentationAnalysis, format_instructions, parse_analysis};
use crate::llm::{ChatModel, GeminiClient, ModelConfig};
use crate::template::PromptTemplate;
use crate::{DoclensError, Result};

/// Configuration for analyzer construction.
#[derive(Clone, Debug)]
pub struct AnalyzerConfig {
    pub model: ModelConfig,
    /// Directory holding `analysis.json` and `revision.json`.
    pub template_dir: PathBuf,
}

impl AnalyzerConfig {
    pub fn new(model: ModelConfig) -> Self {
        Self { model, template_dir: PathBuf::from("prompts") }
    }
}

/// The outcome of one analysis invocation.
///
/// `degraded` is set when the fallback record was substituted after a model
/// or parse failure; the analysis payload itself is indistinguishable from
/// the legacy behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub analysis: DocumentationAnalysis,
    pub degraded: bool,
}

/// Analyzes extracted documentation content and generates revisions.
pub struct DocAnalyzer {
    model: Box<dyn ChatModel>,
    analysis_prompt: PromptTemplate,
    revision_prompt: PromptTemplate,
}

impl DocAnalyzer {
    /// Builds the production analyzer: Gemini client plus templates loaded
    /// from the configured directory.
    ///
    /// # Errors
    ///
    /// Template failures ([`DoclensError::TemplateNotFound`],
    /// [`DoclensError::TemplateMalformed`]) are fatal here; there is no
    /// fallback for a missing prompt.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let model = GeminiClient::new(config.model)?;
        Self::with_model(Box::new(model), &config.template_dir)
    }

    /// Builds an analyzer around any [`ChatModel`] implementation.
    pub fn with_model(model: Box<dyn ChatModel>, template_dir: &Path) -> Result<Self> {
        let analysis_prompt = PromptTemplate::load(template_dir, "analysis")?;
        let revision_prompt = PromptTemplate::load(template_dir, "revision")?;

        Ok(Self { model, analysis_prompt, revision_prompt })
    }

    /// Scores `content` across the four quality categories.
    ///
    /// Exactly one model call is made. On any failure the deterministic
    /// fallback record is returned instead, marked `degraded`.
    pub async fn analyze(&self, content: &str, url: &str) -> AnalysisReport {
        info!(url, "analyzing content");
        match self.try_analyze(content, url).await {
            Ok(analysis) => AnalysisReport { analysis, degraded: false },
            Err(error) => {
                warn!(%error, "analysis failed, substituting fallback record");
                AnalysisReport { analysis: DocumentationAnalysis::fallback(), degraded: true }
            }
        }
    }

    async fn try_analyze(&self, content: &str, url: &str) -> Result<DocumentationAnalysis> {
        let instructions = format_instructions();
        let messages = self.analysis_prompt.render(&[
            ("content", content),
            ("url", url),
            ("format_instructions", &instructions),
        ]);

        let raw = self.model.complete(&messages, true).await?;
        Ok(parse_analysis(&raw)?)
    }

    /// Produces a rewritten version of `original_content` guided by the
    /// analysis feedback.
    ///
    /// # Errors
    ///
    /// Model failures propagate as [`DoclensError::Revision`]; there is no
    /// fallback text to substitute.
    pub async fn revise(&self, original_content: &str, analysis: &DocumentationAnalysis) -> Result<String> {
        info!("generating revised content");
        let feedback = build_feedback(analysis);
        let messages = self
            .revision_prompt
            .render(&[("original_content", original_content), ("feedback", &feedback)]);

        self.model
            .complete(&messages, false)
            .await
            .map_err(|e| DoclensError::Revision(e.to_string()))
    }
}

/// Builds the feedback text interpolated into the revision prompt.
///
/// Categories appear in their fixed order; `Issues:` and `Suggestions:`
/// blocks are emitted only when non-empty.
pub fn build_feedback(analysis: &DocumentationAnalysis) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (name, category) in analysis.categories() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("{} Analysis:", display_name(name)));
        lines.push(format!("Score: {}", category.score));

        if !category.issues.is_empty() {
            lines.push("Issues:".to_string());
            lines.extend(category.issues.iter().map(|issue| format!("- {}", issue)));
        }
        if !category.suggestions.is_empty() {
            lines.push("Suggestions:".to_string());
            lines.extend(category.suggestions.iter().map(|suggestion| format!("- {}", suggestion)));
        }
    }

    lines.join("\n")
}

/// `style_guidelines` -> `Style Guidelines`
fn display_name(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{CategoryAnalysis, Rating};

    fn quiet_category(score: Rating) -> CategoryAnalysis {
        CategoryAnalysis { score, issues: vec![], suggestions: vec![] }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("readability"), "Readability");
        assert_eq!(display_name("style_guidelines"), "Style Guidelines");
    }

    #[test]
    fn test_feedback_issues_without_suggestions() {
        let analysis = DocumentationAnalysis {
            readability: CategoryAnalysis {
                score: Rating::Fair,
                issues: vec!["Long sentences".to_string(), "Unexplained jargon".to_string()],
                suggestions: vec![],
            },
            structure: quiet_category(Rating::Good),
            completeness: quiet_category(Rating::Good),
            style_guidelines: quiet_category(Rating::Good),
        };

        let feedback = build_feedback(&analysis);

        assert!(feedback.contains("Readability Analysis:"));
        assert!(feedback.contains("Score: Fair"));
        assert!(feedback.contains("Issues:"));
        assert_eq!(feedback.matches("- ").count(), 2);
        assert!(!feedback.contains("Suggestions:"));
    }

    #[test]
    fn test_feedback_category_order() {
        let analysis = DocumentationAnalysis {
            readability: quiet_category(Rating::Good),
            structure: quiet_category(Rating::Good),
            completeness: quiet_category(Rating::Good),
            style_guidelines: quiet_category(Rating::Good),
        };

        let feedback = build_feedback(&analysis);
        let readability = feedback.find("Readability Analysis:").unwrap();
        let structure = feedback.find("Structure Analysis:").unwrap();
        let completeness = feedback.find("Completeness Analysis:").unwrap();
        let style = feedback.find("Style Guidelines Analysis:").unwrap();

        assert!(readability < structure);
        assert!(structure < completeness);
        assert!(completeness < style);
    }

    #[test]
    fn test_feedback_suggestions_block() {
        let analysis = DocumentationAnalysis {
            readability: quiet_category(Rating::Excellent),
            structure: CategoryAnalysis {
                score: Rating::Poor,
                issues: vec![],
                suggestions: vec!["Add a table of contents".to_string()],
            },
            completeness: quiet_category(Rating::Excellent),
            style_guidelines: quiet_category(Rating::Excellent),
        };

        let feedback = build_feedback(&analysis);
        assert!(feedback.contains("Suggestions:"));
        assert!(feedback.contains("- Add a table of contents"));
        assert!(!feedback.contains("Issues:"));
    }
}
