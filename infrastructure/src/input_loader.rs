use domain::error::RagError;
use domain::models::{DocumentSet, RagQuery};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub const DEFAULT_INPUT_FILE: &str = "sample_input.json";

const MISSING_FIELDS: &str = "Input JSON must contain 'question' and 'documents' fields.";
const BAD_DOCUMENTS: &str = "Input 'documents' must be a non-empty list of text strings.";

pub struct InputLoader;

impl InputLoader {
    pub fn load(path: &Path) -> Result<RagQuery, RagError> {
        let raw = fs::read_to_string(path).map_err(|source| RagError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&raw).map_err(|source| RagError::ParseInput {
            path: path.to_path_buf(),
            source,
        })?;
        Self::validate(&value)
    }

    /// Shape checks on an already-parsed input document.
    pub fn validate(value: &Value) -> Result<RagQuery, RagError> {
        let (Some(question), Some(documents)) = (value.get("question"), value.get("documents"))
        else {
            return Err(RagError::Validation(MISSING_FIELDS.to_string()));
        };

        let question = question
            .as_str()
            .ok_or_else(|| RagError::Validation("Input 'question' must be a string.".to_string()))?
            .to_string();

        let items = documents
            .as_array()
            .filter(|items| !items.is_empty())
            .ok_or_else(|| RagError::Validation(BAD_DOCUMENTS.to_string()))?;

        let documents = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    RagError::Validation(format!(
                        "{} Entry {} is not a string.",
                        BAD_DOCUMENTS, i
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RagQuery {
            question,
            documents: DocumentSet::new(documents)?,
        })
    }
}
