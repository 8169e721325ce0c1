//! Error types for local validation in the replication engine.

use thiserror::Error;

/// Errors raised before anything is sent to the org.
///
/// Invalid copy specifications are rejected when they are built. Inside a running batch an invalid
/// multiplier fails its own job and [`ValidationError::NonFiniteQuantity`] fails a single line.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// The multiplier is zero, negative, not finite, or not a number at all.
    #[error("Invalid multiplier: {0}")]
    InvalidMultiplier(String),

    /// Scaling overflowed; the line is not created.
    #[error("Scaled quantity for {source_id} is not finite ({quantity} x {multiplier})")]
    NonFiniteQuantity {
        source_id: String,
        quantity: f64,
        multiplier: f64,
    },

    /// A copy specification named the same field twice.
    #[error("Field {0} is listed more than once")]
    DuplicateField(String),

    /// A copyable field is also one the engine writes itself.
    #[error("Field {field} is reserved for the {role}")]
    ReservedField { field: String, role: &'static str },

    /// Field names must be non-empty.
    #[error("Empty field name in copy specification")]
    EmptyFieldName,

    /// A large-text limit of zero would blank the field.
    #[error("Large-text limit for {0} must be positive")]
    ZeroLimit(String),
}
