//! [`ActorEntity`] implementation for [`Opportunity`].
//!
//! Opportunities have no dependencies. The parent link is checked by
//! [`OpportunityClient::create_opportunity`](crate::clients::OpportunityClient::create_opportunity)
//! before the request reaches the actor, since the actor cannot query itself.

use super::error::OpportunityError;
use crate::model::{Opportunity, OpportunityCreate, OpportunityId, OpportunityUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Opportunity {
    type Id = OpportunityId;
    type Create = OpportunityCreate;
    type Update = OpportunityUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = OpportunityError;

    fn from_create_params(id: OpportunityId, params: OpportunityCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(OpportunityError::ValidationError(
                "name is required".to_string(),
            ));
        }
        Ok(Self::new(id, params.name, params.parent))
    }

    async fn on_update(
        &mut self,
        update: OpportunityUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
