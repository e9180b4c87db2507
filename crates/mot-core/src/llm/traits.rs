use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Shown when the endpoint could not be reached or its body was not JSON.
pub const INVALID_RESPONSE_SENTINEL: &str = "[ERROR] Invalid response from model";
/// Shown when the body was JSON but not the expected shape.
pub const INVALID_OUTPUT_SENTINEL: &str = "[ERROR] Invalid model output";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 200,
            temperature: 0.7,
        }
    }
}

/// Why a generation call produced no usable reply.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceFailure {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("response body is not JSON: {0}")]
    Undecodable(String),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),
}

impl InferenceFailure {
    /// The fixed text rendered in place of a reply.
    pub fn sentinel(&self) -> &'static str {
        match self {
            InferenceFailure::Transport(_) | InferenceFailure::Undecodable(_) => {
                INVALID_RESPONSE_SENTINEL
            }
            InferenceFailure::UnexpectedShape(_) => INVALID_OUTPUT_SENTINEL,
        }
    }
}

/// Outcome of one user message. A failure still renders as assistant text.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Failed(InferenceFailure),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Text(text) => text,
            Reply::Failed(failure) => failure.sentinel(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Reply::Failed(_))
    }

    pub fn failure(&self) -> Option<&InferenceFailure> {
        match self {
            Reply::Failed(failure) => Some(failure),
            Reply::Text(_) => None,
        }
    }
}

impl From<Result<String, InferenceFailure>> for Reply {
    fn from(result: Result<String, InferenceFailure>) -> Self {
        match result {
            Ok(text) => Reply::Text(text),
            Err(failure) => Reply::Failed(failure),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// A text-completion backend. One call per user message, no retries.
#[async_trait::async_trait]
pub trait InferenceClient: Send + Sync {
    /// Complete `prompt` and return the extracted assistant reply.
    async fn generate(&self, prompt: &str) -> Result<String, InferenceFailure>;
}
