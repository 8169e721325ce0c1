//! # QuoteLine Actor
//!
//! Stores quote lines and enforces the sandbox org's validation on create and update.
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation and [`QuoteLineContext`]
//! - [`rules`] - [`OrgRules`]: field storage limits and required fields
//! - [`error`] - [`QuoteLineError`]
//!
//! The actor depends on the Quote and QuoteLineGroup actors, which are passed in through
//! [`QuoteLineContext`] when it is started.

pub mod entity;
pub mod error;
pub mod rules;

pub use entity::QuoteLineContext;
pub use error::*;
pub use rules::OrgRules;

use crate::clients::QuoteLineClient;
use crate::model::QuoteLine;
use actor_framework::ResourceActor;

/// Creates a new QuoteLine actor and its client.
pub fn new() -> (ResourceActor<QuoteLine>, QuoteLineClient) {
    let (actor, generic_client) = ResourceActor::new(64);
    (actor, QuoteLineClient::new(generic_client))
}
