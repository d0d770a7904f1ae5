use crate::verification_service::VerificationService;
use domain::chat::ChatMessage;
use domain::error::RagError;
use domain::models::{RagQuery, RankedContext, Verdict};
use infrastructure::{
    completion::CompletionProvider,
    embedder::{Embedder, EmbeddingProvider},
    search::{SearchEngine, TOP_K},
};
use shared::telemetry::{progress, Telemetry};

pub const ANSWER_SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions using ONLY the provided context. \
If the answer is not contained in the context, say 'I don't know'.";

/// Everything a run produces, in the order it was produced.
#[derive(Debug, Clone)]
pub struct RagOutcome {
    pub context: RankedContext,
    pub answer: String,
    pub verification: String,
    pub verdict: Verdict,
}

pub struct RagService<'a> {
    embedder: Embedder<'a>,
    completion: &'a dyn CompletionProvider,
}

impl<'a> RagService<'a> {
    pub fn new(
        embeddings: &'a dyn EmbeddingProvider,
        completion: &'a dyn CompletionProvider,
    ) -> Self {
        Self {
            embedder: Embedder::new(embeddings),
            completion,
        }
    }

    /// Embed, rank and build context, answer, then fact-check the answer.
    pub async fn run(&self, query: &RagQuery) -> Result<RagOutcome, RagError> {
        let context = self.retrieve(query).await?;
        let answer = self.answer(&query.question, &context).await?;
        let verification = VerificationService::new(self.completion)
            .verify(&context, &query.question, &answer)
            .await?;
        let verdict = Verdict::from_report(&verification);
        Ok(RagOutcome {
            context,
            answer,
            verification,
            verdict,
        })
    }

    pub async fn retrieve(&self, query: &RagQuery) -> Result<RankedContext, RagError> {
        let telemetry = Telemetry::new();
        let embedded = self
            .embedder
            .embed_all(&query.question, &query.documents)
            .await
            .map_err(|e| RagError::Embedding(format!("{e:#}")))?;
        telemetry.finish("Embedded");

        let ranking = SearchEngine::find_relevant(&embedded.query, &embedded.documents, TOP_K);
        for (rank, scored) in ranking.iter().enumerate() {
            progress(&format!(
                "#{} input document {} (score {:.3})",
                rank + 1,
                scored.index + 1,
                scored.score
            ));
        }
        Ok(RankedContext::from_ranking(&query.documents, &ranking))
    }

    pub async fn answer(&self, question: &str, context: &RankedContext) -> Result<String, RagError> {
        progress("Asking model...");
        let telemetry = Telemetry::new();
        let answer = self
            .completion
            .complete(&answer_messages(context, question))
            .await
            .map_err(|e| RagError::Generation(format!("{e:#}")))?;
        telemetry.finish("Answered");
        Ok(answer.trim().to_string())
    }
}

pub fn answer_messages(context: &RankedContext, question: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(ANSWER_SYSTEM_PROMPT),
        ChatMessage::user(format!("{}Question: {}", context.render(), question)),
    ]
}
