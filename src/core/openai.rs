//! OpenAI text-completion provider (`POST {api_base}/completions`).

use crate::core::config::Credentials;
use crate::core::provider::{CompletionError, CompletionProvider, CompletionRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

pub struct OpenAiCompletions {
    pub api_base: String,
    pub credentials: Credentials,
    pub client: reqwest::Client,
}

impl OpenAiCompletions {
    pub fn new(api_base: &str, credentials: Credentials) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            credentials,
            // No timeout: the client default applies.
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> String {
        format!("{}/completions", self.api_base)
    }
}

pub fn request_payload(request: &CompletionRequest) -> Value {
    json!({
        "model": request.model,
        "prompt": request.prompt,
        "temperature": request.temperature,
        "max_tokens": request.max_tokens,
    })
}

pub fn extract_text(body: &Value) -> Option<String> {
    body.get("choices")?
        .get(0)?
        .get("text")?
        .as_str()
        .map(|s| s.to_string())
}

#[async_trait]
impl CompletionProvider for OpenAiCompletions {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let api_key = self.credentials.api_key.as_deref().ok_or_else(|| {
            CompletionError::MissingCredentials {
                var: self.credentials.key_var.clone(),
            }
        })?;

        let mut builder = self
            .client
            .post(self.url())
            .bearer_auth(api_key)
            .json(&request_payload(request));
        if let Some(org) = &self.credentials.organization {
            builder = builder.header("OpenAI-Organization", org);
        }

        let res = builder.send().await.map_err(CompletionError::from)?;
        let status = res.status();
        if !status.is_success() {
            let body = res
                .text()
                .await
                .with_context(|| format!("Provider returned {} and its body could not be read", status))?;
            return Err(CompletionError::Provider { status, body }.into());
        }

        let body: Value = res.json().await.map_err(CompletionError::from)?;
        let text = extract_text(&body).ok_or_else(|| {
            CompletionError::MalformedResponse("no text in choices[0]".to_string())
        })?;
        Ok(text)
    }
}
