//! Error types for the Quote actor.

use thiserror::Error;

/// Errors that can occur during quote operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QuoteError {
    /// The linked opportunity does not exist.
    #[error("Invalid opportunity: {0}")]
    InvalidOpportunity(String),

    /// The quote data provided is invalid.
    #[error("Quote validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for QuoteError {
    fn from(msg: String) -> Self {
        QuoteError::ActorCommunicationError(msg)
    }
}
