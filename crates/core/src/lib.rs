pub mod analysis;
pub mod analyzer;
pub mod audit;
pub mod browser;
pub mod error;
pub mod extract;
pub mod llm;
pub mod parse;
pub mod report;
pub mod score;
pub mod template;

pub use analysis::{
    AnalysisParseError, CategoryAnalysis, DocumentationAnalysis, FALLBACK_ISSUE, FALLBACK_SUGGESTION, Rating,
    format_instructions, parse_analysis,
};
pub use analyzer::{AnalysisReport, AnalyzerConfig, DocAnalyzer, build_feedback};
pub use audit::{AuditConfig, AuditOutcome, DocAudit};
pub use browser::{BrowserConfig, HeadlessBrowser, PageRenderer};
pub use error::{DoclensError, Result};
pub use extract::{ExtractConfig, ExtractedContent, extract_segments, extract_text};
pub use llm::{ChatModel, DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, ModelConfig, ModelError};
pub use parse::{Document, Element};
pub use report::{AnalysisRecord, SavedPaths, save_results};
pub use score::{OverallRating, aggregate_points, overall_rating};
pub use template::{PromptMessage, PromptTemplate};
