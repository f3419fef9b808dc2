//! Error types for the finance chatbot.

use fintrack_core::error::FintrackError;

/// Errors from the chatbot.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("unknown query_type: {0}. Supported: expense, income, category, budget, wallet, transactions, summary")]
    UnknownQueryType(String),
    #[error("error processing query: {0}")]
    Store(String),
}

impl From<FintrackError> for ChatError {
    fn from(err: FintrackError) -> Self {
        ChatError::Store(err.to_string())
    }
}
