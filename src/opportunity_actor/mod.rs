//! Opportunity resource actor.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OpportunityClient;
use crate::model::Opportunity;
use actor_framework::ResourceActor;

/// Creates a new Opportunity actor and its client.
pub fn new() -> (ResourceActor<Opportunity>, OpportunityClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, OpportunityClient::new(generic_client))
}
