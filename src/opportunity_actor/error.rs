//! Error types for the Opportunity actor.

use thiserror::Error;

/// Errors that can occur during opportunity operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OpportunityError {
    /// The parent opportunity does not exist.
    #[error("Parent opportunity not found: {0}")]
    ParentNotFound(String),

    /// The opportunity data provided is invalid.
    #[error("Opportunity validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OpportunityError {
    fn from(msg: String) -> Self {
        OpportunityError::ActorCommunicationError(msg)
    }
}
