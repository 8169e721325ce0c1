//! QuoteLineGroup resource actor. Depends on the Quote actor.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::LineGroupClient;
use crate::model::QuoteLineGroup;
use actor_framework::ResourceActor;

/// Creates a new QuoteLineGroup actor and its client.
pub fn new() -> (ResourceActor<QuoteLineGroup>, LineGroupClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, LineGroupClient::new(generic_client))
}
