use anyhow::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

/// One completion call. Built fresh per request and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub prompt: String,
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("credential {var} not found in .env or environment")]
    MissingCredentials { var: String },

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Provider { status: StatusCode, body: String },

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

/// Anything that turns a rendered prompt into raw completion text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Errors are returned as produced; implementations must not retry.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
