//! Error types for the QuoteLineGroup actor.

use thiserror::Error;

/// Errors that can occur during group operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LineGroupError {
    /// The quote the group should sit on does not exist.
    #[error("Invalid quote: {0}")]
    InvalidQuote(String),

    /// The group data provided is invalid.
    #[error("Group validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for LineGroupError {
    fn from(msg: String) -> Self {
        LineGroupError::ActorCommunicationError(msg)
    }
}
