//! Error types for Doclens operations.
//!
//! This module defines the main error type [`DoclensError`] which represents
//! all possible errors that can occur during page rendering, content
//! extraction, prompt loading, and model-backed analysis.
//!
//! # Example
//!
//! ```rust
//! use doclens_core::{DoclensError, Result};
//!
//! fn check_content(text: &str) -> Result<&str> {
//!     if text.is_empty() {
//!         return Err(DoclensError::NoContent);
//!     }
//!     Ok(text)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::analysis::AnalysisParseError;
use crate::llm::ModelError;

/// Main error type for documentation audit operations.
///
/// Extraction errors (`Scrape`, `NoContent`) and `Revision` propagate to the
/// caller; model and parse failures during analysis are absorbed by
/// [`DocAnalyzer::analyze`](crate::DocAnalyzer::analyze), which substitutes a
/// fallback record instead of surfacing them.
#[derive(Error, Debug)]
pub enum DoclensError {
    /// Prompt template file does not exist.
    ///
    /// Fatal at analyzer construction; the tool cannot run without its
    /// prompt definitions.
    #[error("Prompt template not found: {0}")]
    TemplateNotFound(PathBuf),

    /// Prompt template file exists but is not a valid template document.
    #[error("Prompt template '{name}' is malformed: {reason}")]
    TemplateMalformed { name: String, reason: String },

    /// Browser-level failure while rendering a page.
    ///
    /// Wraps launch, navigation, and session errors from the headless
    /// browser. The browser session is still torn down before this is
    /// returned.
    #[error("Browser session failed: {0}")]
    Scrape(String),

    /// Both extraction strategies yielded no usable content.
    ///
    /// Returned when neither the prioritized content selectors nor the
    /// whole-document fallback produce any non-empty line.
    #[error("No substantial content could be extracted from the page")]
    NoContent,

    /// HTML parsing errors, typically an invalid CSS selector.
    #[error("Failed to parse HTML: {0}")]
    HtmlParse(String),

    /// Language-model request failure.
    ///
    /// Surfaces directly only from revision-free call sites; during analysis
    /// it is caught and replaced with the fallback record.
    #[error("Model request failed: {0}")]
    Model(#[from] ModelError),

    /// The model's analysis response did not match the expected schema.
    #[error("Malformed analysis response: {0}")]
    MalformedAnalysis(#[from] AnalysisParseError),

    /// Model failure while generating revised content.
    ///
    /// Unlike analysis there is no safe fallback for "improved text", so
    /// this always propagates.
    #[error("Revision failed: {0}")]
    Revision(String),

    /// File I/O errors while persisting results.
    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for DoclensError.
pub type Result<T> = std::result::Result<T, DoclensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DoclensError::Scrape("chrome binary not found".to_string());
        assert!(err.to_string().contains("Browser session failed"));
        assert!(err.to_string().contains("chrome binary not found"));
    }

    #[test]
    fn test_template_not_found_includes_path() {
        let err = DoclensError::TemplateNotFound(PathBuf::from("prompts/analysis.json"));
        assert!(err.to_string().contains("analysis.json"));
    }

    #[test]
    fn test_template_malformed_includes_name() {
        let err = DoclensError::TemplateMalformed { name: "revision".to_string(), reason: "no messages".to_string() };
        assert!(err.to_string().contains("revision"));
        assert!(err.to_string().contains("no messages"));
    }

    #[test]
    fn test_no_content_message() {
        let err = DoclensError::NoContent;
        assert!(err.to_string().contains("No substantial content"));
    }
}
