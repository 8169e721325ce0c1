//! Error types for the QuoteLine actor.
//!
//! Everything except [`QuoteLineError::ActorCommunicationError`] is the org rejecting the payload.

use thiserror::Error;

/// Errors that can occur during quote line operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QuoteLineError {
    /// The quote the line should sit on does not exist.
    #[error("Invalid quote: {0}")]
    InvalidQuote(String),

    /// The group the line should sit in does not exist.
    #[error("Invalid group: {0}")]
    InvalidGroup(String),

    /// The group exists but belongs to another quote.
    #[error("Group {group} belongs to {group_quote}, not {quote}")]
    GroupOnOtherQuote {
        group: String,
        group_quote: String,
        quote: String,
    },

    /// A text value exceeds the field's storage limit.
    #[error("STRING_TOO_LONG: {field} is {len} characters, limit {limit}")]
    FieldTooLong {
        field: String,
        len: usize,
        limit: usize,
    },

    /// A field the org requires is absent or null.
    #[error("REQUIRED_FIELD_MISSING: {0}")]
    RequiredFieldMissing(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl QuoteLineError {
    /// True when the org answered and refused, as opposed to not answering.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, QuoteLineError::ActorCommunicationError(_))
    }
}

impl From<String> for QuoteLineError {
    fn from(msg: String) -> Self {
        QuoteLineError::ActorCommunicationError(msg)
    }
}
