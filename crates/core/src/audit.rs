//! High-level audit pipeline.
//!
//! [`DocAudit`] wires the renderer, extractor, and analyzer together:
//! render -> extract -> analyze -> aggregate, strictly sequential within one
//! call. Revision is a separate step consuming the content retained on the
//! outcome, so callers decide whether to pay for the second model call.

use crate::analysis::DocumentationAnalysis;
use crate::analyzer::{AnalysisReport, AnalyzerConfig, DocAnalyzer};
use crate::browser::{BrowserConfig, HeadlessBrowser, PageRenderer};
use crate::extract::{ExtractConfig, extract_text};
use crate::parse::Document;
use crate::score::{OverallRating, overall_rating};
use crate::Result;

/// Configuration for the complete pipeline.
#[derive(Clone, Debug)]
pub struct AuditConfig {
    pub browser: BrowserConfig,
    pub extract: ExtractConfig,
    pub analyzer: AnalyzerConfig,
}

impl AuditConfig {
    pub fn new(analyzer: AnalyzerConfig) -> Self {
        Self { browser: BrowserConfig::default(), extract: ExtractConfig::default(), analyzer }
    }
}

/// The result of one audit run.
#[derive(Debug)]
pub struct AuditOutcome {
    pub url: String,
    /// Flattened extracted content, retained for a later revision call.
    pub content: String,
    pub report: AnalysisReport,
    pub overall: OverallRating,
}

/// One-request-in, one-report-out documentation audit.
pub struct DocAudit {
    renderer: Box<dyn PageRenderer>,
    analyzer: DocAnalyzer,
    extract: ExtractConfig,
}

impl DocAudit {
    /// Builds the production pipeline.
    ///
    /// # Errors
    ///
    /// Fails when the prompt templates cannot be loaded or the model client
    /// cannot be constructed.
    pub fn new(config: AuditConfig) -> Result<Self> {
        let renderer = HeadlessBrowser::new(config.browser);
        let analyzer = DocAnalyzer::new(config.analyzer)?;

        Ok(Self { renderer: Box::new(renderer), analyzer, extract: config.extract })
    }

    /// Builds a pipeline from injected components.
    pub fn with_components(renderer: Box<dyn PageRenderer>, analyzer: DocAnalyzer, extract: ExtractConfig) -> Self {
        Self { renderer, analyzer, extract }
    }

    /// Renders the page and extracts its cleaned text content.
    ///
    /// # Errors
    ///
    /// [`DoclensError::Scrape`](crate::DoclensError::Scrape) for browser
    /// failures, [`DoclensError::NoContent`](crate::DoclensError::NoContent)
    /// when both extraction strategies come up empty.
    pub async fn scrape(&self, url: &str) -> Result<String> {
        let html = self.renderer.render(url).await?;
        let doc = Document::parse(&html);
        extract_text(&doc, &self.extract)
    }

    /// Runs the full audit: scrape, analyze, aggregate.
    pub async fn run(&self, url: &str) -> Result<AuditOutcome> {
        let content = self.scrape(url).await?;
        let report = self.analyzer.analyze(&content, url).await;
        let overall = overall_rating(&report.analysis);

        Ok(AuditOutcome { url: url.to_string(), content, report, overall })
    }

    /// Generates revised content from a previous audit's material.
    pub async fn revise(&self, original_content: &str, analysis: &DocumentationAnalysis) -> Result<String> {
        self.analyzer.revise(original_content, analysis).await
    }
}
