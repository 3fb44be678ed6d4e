//! Prompt template loading and rendering.
//!
//! Templates live as JSON documents named `<name>.json` in a template
//! directory, shaped as `{"messages": [{"role": ..., "content": ...}]}`.
//! They are loaded once at analyzer construction and are immutable
//! afterwards; a missing or malformed template is fatal because the tool
//! cannot make a model call without its prompt.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::{DoclensError, Result};

/// A single role/content pair within a prompt template.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: String,
}

/// An ordered sequence of prompt messages loaded from external storage.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptTemplate {
    pub messages: Vec<PromptMessage>,
}

impl PromptTemplate {
    /// Loads and parses the template named `name` from `dir`.
    ///
    /// # Errors
    ///
    /// [`DoclensError::TemplateNotFound`] if `<dir>/<name>.json` does not
    /// exist; [`DoclensError::TemplateMalformed`] if it cannot be read,
    /// is not valid JSON of the expected shape, or contains no messages.
    pub fn load(dir: &Path, name: &str) -> Result<Self> {
        let path = dir.join(format!("{}.json", name));
        if !path.exists() {
            return Err(DoclensError::TemplateNotFound(path));
        }

        let raw = fs::read_to_string(&path)
            .map_err(|e| DoclensError::TemplateMalformed { name: name.to_string(), reason: e.to_string() })?;

        let template: PromptTemplate = serde_json::from_str(&raw)
            .map_err(|e| DoclensError::TemplateMalformed { name: name.to_string(), reason: e.to_string() })?;

        if template.messages.is_empty() {
            return Err(DoclensError::TemplateMalformed {
                name: name.to_string(),
                reason: "template contains no messages".to_string(),
            });
        }

        Ok(template)
    }

    /// Renders the template by substituting `{name}` placeholders.
    ///
    /// Substitution is literal; placeholders without a matching variable are
    /// left in place.
    pub fn render(&self, vars: &[(&str, &str)]) -> Vec<PromptMessage> {
        self.messages
            .iter()
            .map(|message| PromptMessage { role: message.role.clone(), content: interpolate(&message.content, vars) })
            .collect()
    }
}

fn interpolate(text: &str, vars: &[(&str, &str)]) -> String {
    vars.iter()
        .fold(text.to_string(), |acc, (name, value)| acc.replace(&format!("{{{}}}", name), value))
}
