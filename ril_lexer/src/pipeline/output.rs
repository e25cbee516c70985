use crate::tokens::Token;
use serde::{Deserialize, Serialize};

/// Serializable token dump handed to the external parser
#[derive(Debug, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub file: String,
    pub tokens: Vec<Token>,
}

impl PipelineOutput {
    pub fn new(file: String, tokens: Vec<Token>) -> Self {
        Self { file, tokens }
    }

    /// Build the output from a pipeline result, keeping only tokens the
    /// parser should see
    pub fn from_result(file: String, result: &super::PipelineResult) -> Self {
        Self {
            file,
            tokens: result.tokens.iter_significant().cloned().collect(),
        }
    }

    /// Render as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
