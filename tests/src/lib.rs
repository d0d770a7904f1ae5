//! Stub providers shared by the end-to-end pipeline tests.

use async_trait::async_trait;
use domain::chat::ChatMessage;
use infrastructure::completion::CompletionProvider;
use infrastructure::embedder::EmbeddingProvider;
use shared::types::Result;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Bag-of-keywords embedding: one axis per keyword, plus a small constant so
/// no vector is ever zero.
pub struct KeywordEmbedder {
    keywords: Vec<&'static str>,
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new(keywords: &[&'static str]) -> Self {
        Self {
            keywords: keywords.to_vec(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let lower = text.to_lowercase();
        Ok(self
            .keywords
            .iter()
            .map(|k| lower.matches(k).count() as f32 + 0.01)
            .collect())
    }
}

/// Replays canned replies in order and records every request.
pub struct CannedCompletion {
    replies: Mutex<Vec<Result<String>>>,
    requests: Mutex<Vec<Vec<ChatMessage>>>,
}

impl CannedCompletion {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(replies: &[&str]) -> Self {
        Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for CannedCompletion {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        self.requests.lock().unwrap().push(messages.to_vec());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            anyhow::bail!("no canned reply left");
        }
        replies.remove(0)
    }
}
