//! # Quote Actor
//!
//! Stores quotes. Started with an [`OpportunityClient`](crate::clients::OpportunityClient) as
//! context so that a quote's opportunity link can be checked on create.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::QuoteAction;
pub use error::*;

use crate::clients::QuoteClient;
use crate::model::Quote;
use actor_framework::ResourceActor;

/// Creates a new Quote actor and its client.
pub fn new() -> (ResourceActor<Quote>, QuoteClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, QuoteClient::new(generic_client))
}
