use crate::config::Config;
use anyhow::{bail, Context};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::types::Result;
use std::sync::Arc;

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// Talks to a local Ollama server, used here only for sentence embeddings.
#[derive(Clone)]
pub struct OllamaClient {
    client: Arc<Client>,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("failed to build Ollama HTTP client")?;
        Ok(Self {
            client: Arc::new(client),
            base_url: config.ollama_base_url.clone(),
            model: config.embedding_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/api/embeddings", self.base_url);
        let request = EmbeddingRequest {
            model: &self.model,
            prompt: text,
        };
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("failed contacting Ollama at {}", self.base_url))?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            bail!("Ollama returned {}: {}", status, body);
        }
        let embedding_response: EmbeddingResponse = response
            .json()
            .await
            .context("failed to parse Ollama embedding response")?;
        Ok(embedding_response.embedding)
    }
}
