use crate::completion::CompletionProvider;
use crate::config::Config;
use anyhow::{anyhow, bail, Context};
use async_trait::async_trait;
use domain::chat::ChatMessage;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::types::Result;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat completions client, pointed at OpenRouter by default.
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl OpenRouterClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", config.api_key);
        let mut auth = HeaderValue::from_str(&auth).context("invalid OpenRouter API key")?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(config.request_timeout)
            .default_headers(headers)
            .build()
            .context("failed to build OpenRouter HTTP client")?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.completion_base_url),
            model: config.completion_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages,
        };
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .context("failed to call chat completions")?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            bail!("completion endpoint returned {}: {}", status, text);
        }
        let raw = resp.text().await.context("failed to read completion response")?;
        parse_completion(&raw)
    }
}

/// First choice's content from a chat-completions body.
fn parse_completion(raw: &str) -> Result<String> {
    let parsed: ChatResponse =
        serde_json::from_str(raw).context("failed to parse completion response")?;
    parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("completion response contained no choices"))?
        .message
        .content
        .ok_or_else(|| anyhow!("completion response had no message content"))
}
