//! An opportunity, optionally the child of another.
//!
//! # Actor Framework
//! Implements [`ActorEntity`](actor_framework::ActorEntity) in
//! [`opportunity_actor::entity`](crate::opportunity_actor::entity); the parent link is checked on
//! create.
use super::ids::OpportunityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub name: String,
    pub parent: Option<OpportunityId>,
}

impl Opportunity {
    pub fn new(id: OpportunityId, name: impl Into<String>, parent: Option<OpportunityId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
        }
    }
}

/// Payload for creating an opportunity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityCreate {
    pub name: String,
    #[serde(default)]
    pub parent: Option<OpportunityId>,
}

/// Payload for renaming an opportunity.
#[derive(Debug, Clone)]
pub struct OpportunityUpdate {
    pub name: Option<String>,
}
