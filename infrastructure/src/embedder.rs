use super::ollama_client::OllamaClient;
use anyhow::bail;
use async_trait::async_trait;
use domain::models::{DocumentSet, EmbeddingVector};
use shared::telemetry::progress;
use shared::types::Result;

/// Anything that can turn text into a fixed-length vector.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector>;
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    async fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        self.generate_embedding(text).await
    }
}

/// Query and document vectors for one run, documents in input order.
#[derive(Debug, Clone)]
pub struct EmbeddedInput {
    pub query: EmbeddingVector,
    pub documents: Vec<EmbeddingVector>,
}

pub struct Embedder<'a> {
    provider: &'a dyn EmbeddingProvider,
}

impl<'a> Embedder<'a> {
    pub fn new(provider: &'a dyn EmbeddingProvider) -> Self {
        Self { provider }
    }

    /// Blank texts are not sent to the provider; they get a zero vector of
    /// the shared dimension, which the ranker scores as 0.
    pub async fn embed_all(&self, question: &str, documents: &DocumentSet) -> Result<EmbeddedInput> {
        progress(&format!("Embedding {} texts...", documents.len() + 1));
        let query = self.embed_text(question).await?;
        let mut embedded = Vec::with_capacity(documents.len());
        for text in documents.iter() {
            embedded.push(self.embed_text(text).await?);
        }

        let dimension = query
            .iter()
            .chain(embedded.iter().flatten())
            .map(Vec::len)
            .next()
            .unwrap_or(0);
        for (i, vector) in embedded.iter().enumerate() {
            if let Some(v) = vector {
                if v.len() != dimension {
                    bail!(
                        "document {} embedded to {} dimensions, expected {}",
                        i,
                        v.len(),
                        dimension
                    );
                }
            }
        }

        let zeros = || vec![0.0; dimension];
        Ok(EmbeddedInput {
            query: query.unwrap_or_else(zeros),
            documents: embedded
                .into_iter()
                .map(|v| v.unwrap_or_else(zeros))
                .collect(),
        })
    }

    async fn embed_text(&self, text: &str) -> Result<Option<EmbeddingVector>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        let vector = self.provider.embed(text).await?;
        if vector.is_empty() {
            bail!("embedding model returned an empty vector for non-blank text");
        }
        Ok(Some(vector))
    }
}
