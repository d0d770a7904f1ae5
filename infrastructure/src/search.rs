use domain::models::ScoredDocument;
use std::cmp::Ordering;

/// How many documents go into the prompt.
pub const TOP_K: usize = 2;

pub struct SearchEngine;

impl SearchEngine {
    /// Unit-length copy of `v`. A zero vector stays zero.
    pub fn normalize(v: &[f32]) -> Vec<f32> {
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm == 0.0 || !norm.is_finite() {
            return vec![0.0; v.len()];
        }
        v.iter().map(|x| x / norm).collect()
    }

    /// One score per document, in input order.
    pub fn score(query: &[f32], documents: &[Vec<f32>]) -> Vec<ScoredDocument> {
        let query = Self::normalize(query);
        documents
            .iter()
            .enumerate()
            .map(|(index, doc)| ScoredDocument {
                index,
                score: Self::normalize(doc)
                    .iter()
                    .zip(query.iter())
                    .map(|(x, y)| x * y)
                    .sum(),
            })
            .collect()
    }

    /// Best `min(top_k, len)` documents by descending score. The sort is
    /// stable, so equal scores keep input order; NaN sorts last.
    pub fn top_k(mut scored: Vec<ScoredDocument>, top_k: usize) -> Vec<ScoredDocument> {
        scored.sort_by(|a, b| descending(a.score, b.score));
        scored.truncate(top_k.min(scored.len()));
        scored
    }

    pub fn find_relevant(query: &[f32], documents: &[Vec<f32>], top_k: usize) -> Vec<ScoredDocument> {
        Self::top_k(Self::score(query, documents), top_k)
    }
}

fn descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
