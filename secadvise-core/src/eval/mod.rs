//! Evaluation support
//!
//! Test-case records handed to an external evaluator, and the judge adapter
//! that lets that evaluator grade with the configured backend.

pub mod judge;

use crate::advisor::RagResponse;
use serde::{Deserialize, Serialize};

pub use judge::{DecodeTarget, JudgeModel, Structured};

/// One graded interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalCase {
    pub input: String,
    pub actual_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrieval_context: Option<Vec<String>>,
}

impl EvalCase {
    pub fn new(input: impl Into<String>, actual_output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            actual_output: actual_output.into(),
            expected_output: None,
            retrieval_context: None,
        }
    }

    pub fn expected(mut self, expected_output: impl Into<String>) -> Self {
        self.expected_output = Some(expected_output.into());
        self
    }

    pub fn with_context(mut self, retrieval_context: Vec<String>) -> Self {
        self.retrieval_context = Some(retrieval_context);
        self
    }
}

impl From<RagResponse> for EvalCase {
    fn from(rag: RagResponse) -> Self {
        EvalCase::new(rag.query, rag.response).with_context(rag.retrieval_context)
    }
}
