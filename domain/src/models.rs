use crate::error::RagError;

pub type EmbeddingVector = Vec<f32>;

/// A validated question plus the documents it should be answered from.
#[derive(Debug, Clone)]
pub struct RagQuery {
    pub question: String,
    pub documents: DocumentSet,
}

/// Ordered, non-empty list of document texts. A document's position is its
/// stable index for ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSet {
    documents: Vec<String>,
}

impl DocumentSet {
    pub fn new(documents: Vec<String>) -> Result<Self, RagError> {
        if documents.is_empty() {
            return Err(RagError::Validation(
                "Input 'documents' must be a non-empty list of text strings.".to_string(),
            ));
        }
        Ok(Self { documents })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.documents.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.documents
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(String::as_str)
    }
}

/// Cosine similarity of one document against the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDocument {
    pub index: usize,
    pub score: f32,
}

/// The documents selected for the prompt, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedContext {
    documents: Vec<String>,
}

impl RankedContext {
    /// Entries whose index falls outside `documents` are skipped.
    pub fn from_ranking(documents: &DocumentSet, ranking: &[ScoredDocument]) -> Self {
        let documents = ranking
            .iter()
            .filter_map(|scored| documents.get(scored.index))
            .map(str::to_string)
            .collect();
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Labels restart at 1 in ranked order, independent of input position.
    pub fn render(&self) -> String {
        self.documents
            .iter()
            .enumerate()
            .map(|(i, doc)| format!("Document {}: {}\n", i + 1, doc))
            .collect()
    }
}

const CLEAN_REPORT_PREFIX: &str = "no hallucinations";

/// Outcome of the fact-checking pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Clean,
    /// Carries the full verification text, explanations included.
    Flagged(String),
}

impl Verdict {
    pub fn from_report(report: &str) -> Self {
        if report.to_lowercase().starts_with(CLEAN_REPORT_PREFIX) {
            Verdict::Clean
        } else {
            Verdict::Flagged(report.to_string())
        }
    }
}
