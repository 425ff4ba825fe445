//! Engine error types.

use thiserror::Error;

/// Errors raised while assembling test variants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Every remaining candidate is already part of the variant being built.
    #[error("pool exhausted: requested {requested} items but only {available} are available")]
    PoolExhausted { requested: usize, available: usize },

    /// A choice question whose correct-answer index points outside its choices.
    #[error("answer index {index} is out of range for {choices} choices in \"{question}\"")]
    InvalidAnswerIndex {
        question: String,
        index: u32,
        choices: usize,
    },

    /// The test definition could not be parsed.
    #[error("invalid test definition: {0}")]
    InvalidDefinition(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::InvalidDefinition(err.to_string())
    }
}
