//! Type-safe identifiers for sandbox records.
//!
//! Ids are generated by the owning actor from a `u32` counter and rendered with a per-type prefix
//! (`quote_3`, `line_17`). The rendered form is what leaves the sandbox, so every id also parses
//! back from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A string that is not a well-formed id of the expected type.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Malformed {kind} id: {value:?}")]
pub struct IdParseError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.strip_prefix(concat!($prefix, "_"))
                    .and_then(|n| n.parse().ok())
                    .map(Self)
                    .ok_or_else(|| IdParseError {
                        kind: $prefix,
                        value: s.to_string(),
                    })
            }
        }
    };
}

record_id!(
    /// Identifier of an [`Opportunity`](super::Opportunity).
    OpportunityId,
    "opp"
);
record_id!(
    /// Identifier of a [`Quote`](super::Quote).
    QuoteId,
    "quote"
);
record_id!(
    /// Identifier of a [`QuoteLineGroup`](super::QuoteLineGroup).
    GroupId,
    "group"
);
record_id!(
    /// Identifier of a [`QuoteLine`](super::QuoteLine).
    LineId,
    "line"
);
