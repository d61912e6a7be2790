//! LLM transport. The trait is the seam the rest of the crate programs
//! against; `HttpLlmClient` is the production implementation covering the
//! OpenAI, Anthropic, and Ollama wire formats.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use shopscout_core::config::{LlmConfig, LlmProvider};
use tracing::warn;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
impl<T> LlmClient for std::sync::Arc<T>
where
    T: LlmClient + ?Sized,
{
    async fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt).await
    }
}

pub struct HttpLlmClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl HttpLlmClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to construct llm http client")?;
        Ok(Self { http, config })
    }

    async fn complete_once(&self, prompt: &str) -> Result<String> {
        match self.config.provider {
            LlmProvider::OpenAi => self.complete_openai(prompt).await,
            LlmProvider::Anthropic => self.complete_anthropic(prompt).await,
            LlmProvider::Ollama => self.complete_ollama(prompt).await,
        }
    }

    async fn complete_openai(&self, prompt: &str) -> Result<String> {
        let base_url =
            self.config.base_url.as_deref().unwrap_or("https://api.openai.com").trim_end_matches('/');
        let api_key = self.config.api_key.as_ref().context("openai provider requires an api key")?;

        let body = json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = self
            .http
            .post(format!("{base_url}/v1/chat/completions"))
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .context("openai request failed")?
            .error_for_status()
            .context("openai returned an error status")?;

        let payload: Value = response.json().await.context("openai response was not json")?;
        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("openai response missing message content"))
    }

    async fn complete_anthropic(&self, prompt: &str) -> Result<String> {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .unwrap_or("https://api.anthropic.com")
            .trim_end_matches('/');
        let api_key =
            self.config.api_key.as_ref().context("anthropic provider requires an api key")?;

        let body = json!({
            "model": self.config.model,
            "max_tokens": 1024,
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = self
            .http
            .post(format!("{base_url}/v1/messages"))
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", "2023-06-01")
            .json(&body)
            .send()
            .await
            .context("anthropic request failed")?
            .error_for_status()
            .context("anthropic returned an error status")?;

        let payload: Value = response.json().await.context("anthropic response was not json")?;
        payload["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("anthropic response missing text content"))
    }

    async fn complete_ollama(&self, prompt: &str) -> Result<String> {
        let base_url = self
            .config
            .base_url
            .as_deref()
            .context("ollama provider requires a base url")?
            .trim_end_matches('/');

        let body = json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
        });

        let response = self
            .http
            .post(format!("{base_url}/api/generate"))
            .json(&body)
            .send()
            .await
            .context("ollama request failed")?
            .error_for_status()
            .context("ollama returned an error status")?;

        let payload: Value = response.json().await.context("ollama response was not json")?;
        payload["response"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("ollama response missing response field"))
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                tokio::time::sleep(Duration::from_millis(250 * u64::from(attempt))).await;
            }

            match self.complete_once(prompt).await {
                Ok(reply) => return Ok(reply),
                Err(error) => {
                    warn!(attempt, %error, "llm completion attempt failed");
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("llm completion failed with no attempts made")))
    }
}
