//! A CPQ quote.
//!
//! # Actor Framework
//! Implements [`ActorEntity`](actor_framework::ActorEntity) in
//! [`quote_actor::entity`](crate::quote_actor::entity). A quote may be linked to an opportunity, and
//! at most one quote per opportunity is expected to be primary (not enforced).
use super::ids::{OpportunityId, QuoteId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub id: QuoteId,
    pub name: String,
    pub opportunity: Option<OpportunityId>,
    pub primary: bool,
}

impl Quote {
    pub fn new(
        id: QuoteId,
        name: impl Into<String>,
        opportunity: Option<OpportunityId>,
        primary: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            opportunity,
            primary,
        }
    }
}

/// Payload for creating a quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteCreate {
    pub name: String,
    #[serde(default)]
    pub opportunity: Option<OpportunityId>,
    #[serde(default)]
    pub primary: bool,
}

/// Field changes; the primary flag goes through
/// [`QuoteAction::SetPrimary`](crate::quote_actor::QuoteAction::SetPrimary).
#[derive(Debug, Clone, Default)]
pub struct QuoteUpdate {
    pub name: Option<String>,
}
