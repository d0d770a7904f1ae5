//! Failure taxonomy for a single question-answering run.
//!
//! Every variant is terminal: the binary prints the display string on one
//! line and exits with status 1.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RagError {
    /// Missing or placeholder API key, or an unusable setting.
    #[error("Error: {0}")]
    Configuration(String),

    /// The input file could not be read.
    #[error("Error reading input file {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: io::Error,
    },

    /// The input file is not valid JSON.
    #[error("Error reading input file {path}: {source}")]
    ParseInput {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The JSON parsed but does not have the required shape.
    #[error("{0}")]
    Validation(String),

    #[error("Error during embedding: {0}")]
    Embedding(String),

    #[error("Error during generation: {0}")]
    Generation(String),

    #[error("Error during verification: {0}")]
    Verification(String),
}

impl RagError {
    /// Errors caused by the input file itself, where a usage hint helps.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::ReadInput { .. } | Self::ParseInput { .. })
    }
}
