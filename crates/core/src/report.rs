//! Result persistence.
//!
//! Writes the analysis snapshot (`{url, timestamp, analysis}`) as pretty
//! JSON and, when a revision was produced, the revised text alongside it.
//! File names carry a `%Y%m%d_%H%M%S` stamp; there is no overwrite
//! protection beyond stamp uniqueness at second granularity.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use crate::analysis::DocumentationAnalysis;
use crate::{DoclensError, Result};

/// The persisted analysis snapshot.
#[derive(Debug, Serialize)]
pub struct AnalysisRecord<'a> {
    pub url: &'a str,
    pub timestamp: DateTime<Local>,
    pub analysis: &'a DocumentationAnalysis,
}

/// Paths written by [`save_results`].
#[derive(Debug)]
pub struct SavedPaths {
    pub analysis: PathBuf,
    pub revision: Option<PathBuf>,
}

/// Persists an analysis (and optionally revised content) under `dir`.
///
/// The directory is created if absent.
pub fn save_results(
    dir: &Path, url: &str, analysis: &DocumentationAnalysis, revised: Option<&str>,
) -> Result<SavedPaths> {
    fs::create_dir_all(dir)?;

    let now = Local::now();
    let stamp = now.format("%Y%m%d_%H%M%S").to_string();

    let record = AnalysisRecord { url, timestamp: now, analysis };
    let json = serde_json::to_string_pretty(&record).map_err(|e| DoclensError::Io(std::io::Error::other(e)))?;

    let analysis_path = dir.join(format!("analysis_{}.json", stamp));
    fs::write(&analysis_path, json)?;
    info!(path = %analysis_path.display(), "analysis snapshot written");

    let revision_path = match revised {
        Some(text) => {
            let path = dir.join(format!("revised_content_{}.txt", stamp));
            fs::write(&path, text)?;
            info!(path = %path.display(), "revised content written");
            Some(path)
        }
        None => None,
    };

    Ok(SavedPaths { analysis: analysis_path, revision: revision_path })
}
