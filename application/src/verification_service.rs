use domain::chat::ChatMessage;
use domain::error::RagError;
use domain::models::RankedContext;
use infrastructure::completion::CompletionProvider;
use shared::telemetry::{progress, Telemetry};

pub const VERIFY_SYSTEM_PROMPT: &str = "You are a fact-checking assistant. Using ONLY the provided context documents, \
identify any parts of the answer that are NOT supported by the context. \
List these unsupported statements as 'hallucinations'. \
If all statements are supported by the context, reply 'No hallucinations'.";

/// Second pass over the same endpoint: checks an answer against its context.
pub struct VerificationService<'a> {
    completion: &'a dyn CompletionProvider,
}

impl<'a> VerificationService<'a> {
    pub fn new(completion: &'a dyn CompletionProvider) -> Self {
        Self { completion }
    }

    pub async fn verify(
        &self,
        context: &RankedContext,
        question: &str,
        answer: &str,
    ) -> Result<String, RagError> {
        progress("Verifying answer...");
        let telemetry = Telemetry::new();
        let report = self
            .completion
            .complete(&verification_messages(context, question, answer))
            .await
            .map_err(|e| RagError::Verification(format!("{e:#}")))?;
        telemetry.finish("Verified");
        Ok(report.trim().to_string())
    }
}

pub fn verification_messages(
    context: &RankedContext,
    question: &str,
    answer: &str,
) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(VERIFY_SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "{}Question: {}\nAnswer: {}",
            context.render(),
            question,
            answer
        )),
    ]
}
