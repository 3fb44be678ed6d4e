//! Language-model boundary.
//!
//! [`ChatModel`] is the seam the analyzer talks through: one chat-style call
//! in, raw response text out. [`GeminiClient`] is the production
//! implementation against the Gemini `generateContent` API. Each invocation
//! is a single attempt; there is no retry or backoff at this layer, and the
//! client keeps no state between calls.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::template::PromptMessage;

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
/// Default API endpoint prefix.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const MAX_ERROR_BODY_BYTES: usize = 8 * 1024;

/// Model client configuration.
///
/// The credential is carried here explicitly; nothing in this module reads
/// the environment.
#[derive(Clone, Debug)]
pub struct ModelConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub temperature: Option<f32>,
}

impl ModelConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
            temperature: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned error: status={status} message={message}")]
    Upstream { status: StatusCode, message: String },

    #[error("upstream returned non-JSON error: status={status} body={body}")]
    UpstreamBody { status: StatusCode, body: String },

    #[error("model returned no usable candidates")]
    EmptyResponse,
}

/// One chat completion per call; implementations must be stateless between
/// calls.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends the rendered messages and returns the raw response text.
    ///
    /// `json_output` asks the model for a JSON-typed response body rather
    /// than free text.
    async fn complete(&self, messages: &[PromptMessage], json_output: bool) -> Result<String, ModelError>;
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    config: ModelConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: ModelConfig) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .user_agent("doclens/0.1")
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn complete(&self, messages: &[PromptMessage], json_output: bool) -> Result<String, ModelError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        let request = GenerateContentRequest::from_messages(messages, json_output, self.config.temperature);

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(to_upstream_error(resp).await);
        }

        let parsed: GenerateContentResponse = resp.json().await?;
        parsed.first_text().ok_or(ModelError::EmptyResponse)
    }
}

async fn to_upstream_error(resp: reqwest::Response) -> ModelError {
    let status = resp.status();
    let body = read_limited_text(resp, MAX_ERROR_BODY_BYTES).await;
    if let Ok(parsed) = serde_json::from_str::<GeminiErrorEnvelope>(&body) {
        let message = parsed
            .error
            .message
            .unwrap_or_else(|| "unknown upstream error".to_string());
        return ModelError::Upstream { status, message };
    }
    ModelError::UpstreamBody { status, body }
}

async fn read_limited_text(resp: reqwest::Response, max_bytes: usize) -> String {
    match resp.bytes().await {
        Ok(mut b) => {
            if b.len() > max_bytes {
                b.truncate(max_bytes);
            }
            String::from_utf8_lossy(&b).to_string()
        }
        Err(e) => {
            warn!(error = %e, "failed to read upstream error body");
            "<failed to read error body>".to_string()
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorObject,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorObject {
    message: Option<String>,
    #[allow(dead_code)]
    code: Option<i64>,
    #[allow(dead_code)]
    status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Maps template messages onto the Gemini wire shape: `system` roles
    /// collect into the system instruction, assistant-style roles become
    /// `model` turns, everything else is a `user` turn.
    fn from_messages(messages: &[PromptMessage], json_output: bool, temperature: Option<f32>) -> Self {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for message in messages {
            match message.role.as_str() {
                "system" => system_parts.push(Part::text(&message.content)),
                "assistant" | "model" | "ai" => contents.push(Content::turn("model", &message.content)),
                _ => contents.push(Content::turn("user", &message.content)),
            }
        }

        let system_instruction =
            (!system_parts.is_empty()).then_some(Content { role: None, parts: system_parts });

        let generation_config = if json_output || temperature.is_some() {
            Some(GenerationConfig {
                temperature,
                response_mime_type: json_output.then(|| "application/json".to_string()),
            })
        } else {
            None
        };

        Self { contents, system_instruction, generation_config }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn turn(role: &str, text: &str) -> Self {
        Self { role: Some(role.to_string()), parts: vec![Part::text(text)] }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Part {
    fn text(text: &str) -> Self {
        Self { text: Some(text.to_string()) }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}
